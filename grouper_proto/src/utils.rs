//! Grouper encodes booleans as the strings `"T"` and `"F"`.

/// The Grouper encoding of a flag.
pub fn flag(value: bool) -> &'static str {
    if value {
        "T"
    } else {
        "F"
    }
}

/// Parse a Grouper flag. Older servers sometimes send `true` / `false`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "T" | "true" => Some(true),
        "F" | "false" => Some(false),
        _ => None,
    }
}

/// serde adapter for `bool` fields carried as `"T"` / `"F"`.
pub mod tf {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(super::flag(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_flag(&s).ok_or_else(|| D::Error::custom(format!("invalid flag {:?}", s)))
    }
}

/// As [`tf`], for optional request parameters.
pub mod tf_option {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(super::flag(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => super::parse_flag(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid flag {:?}", s))),
            None => Ok(None),
        }
    }
}
