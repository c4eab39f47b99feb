use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// Deserialize a field that can be either a single item or a vector of items
pub fn single_or_vec<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    struct SingleOrVec<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for SingleOrVec<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("single item or array of items")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            // If we get a single object, wrap it in a vector
            let item = T::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(vec![item])
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(SingleOrVec(PhantomData))
}

/// Deserialize a field that can be either a single item or a vector, but can also be null/missing
pub fn single_or_vec_or_null<'de, T, D>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SingleOrVecOrNull<T> {
        Null,
        Single(T),
        Multiple(Vec<T>),
    }

    match SingleOrVecOrNull::deserialize(deserializer)? {
        SingleOrVecOrNull::Null => Ok(None),
        SingleOrVecOrNull::Single(val) => Ok(Some(vec![val])),
        SingleOrVecOrNull::Multiple(vec) => Ok(Some(vec)),
    }
}

/// Deserialize statute text that is either a string or (nested) arrays of lines.
///
/// Lines are joined with `\n`; null becomes the empty string.
pub fn text_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrLines {
        Text(String),
        Lines(Vec<TextOrLines>),
        Null(()),
    }

    fn flatten(value: TextOrLines, lines: &mut Vec<String>) {
        match value {
            TextOrLines::Text(text) => lines.push(text),
            TextOrLines::Lines(nested) => {
                for value in nested {
                    flatten(value, lines);
                }
            }
            TextOrLines::Null(()) => {}
        }
    }

    let mut lines = Vec::new();
    flatten(TextOrLines::deserialize(deserializer)?, &mut lines);
    Ok(lines.join("\n"))
}
