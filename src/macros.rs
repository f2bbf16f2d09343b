/// Implements `Serialize` and `Deserialize` for a type through its string
/// form, using its `ToString` and `FromStr` implementations.
#[macro_export]
macro_rules! serde_via_str {
    ($e:ty) => {
        impl<'de> serde::Deserialize<'de> for $e {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse::<$e>().map_err(serde::de::Error::custom)
            }
        }

        impl serde::Serialize for $e {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }
    };
}
