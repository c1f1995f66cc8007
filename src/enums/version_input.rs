use crate::enums::prompt_version::PromptVersion;

/// Anything a caller may hand to the prompt resolver as a version.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionInput {
    Tag(PromptVersion),
    Text(String),
    /// A value of a kind that can never name a version.
    Other { type_name: &'static str, value: String },
}

impl From<PromptVersion> for VersionInput {
    fn from(version: PromptVersion) -> Self {
        Self::Tag(version)
    }
}

impl From<&str> for VersionInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for VersionInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for VersionInput {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

macro_rules! other_version_input {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl From<$ty> for VersionInput {
                fn from(value: $ty) -> Self {
                    Self::Other { type_name: $name, value: value.to_string() }
                }
            }
        )*
    };
}

other_version_input! {
    i32 => "int",
    i64 => "int",
    u32 => "int",
    u64 => "int",
    f32 => "float",
    f64 => "float",
    bool => "bool",
}

impl From<serde_json::Value> for VersionInput {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        let type_name = match &value {
            Value::String(text) => return Self::Text(text.clone()),
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(number) if number.is_f64() => "float",
            Value::Number(_) => "int",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Self::Other { type_name, value: value.to_string() }
    }
}

impl From<toml::Value> for VersionInput {
    fn from(value: toml::Value) -> Self {
        if let toml::Value::String(text) = value {
            return Self::Text(text);
        }

        Self::Other { type_name: value.type_str(), value: value.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_become_text() {
        assert_eq!(VersionInput::from(" v0.1 "), VersionInput::Text(" v0.1 ".to_string()));
        assert_eq!(VersionInput::from(json!("v0.1")), VersionInput::Text("v0.1".to_string()));
        assert_eq!(
            VersionInput::from(toml::Value::String("V0.1".into())),
            VersionInput::Text("V0.1".to_string())
        );
    }

    #[test]
    fn non_strings_become_other() {
        assert_eq!(
            VersionInput::from(42),
            VersionInput::Other { type_name: "int", value: "42".to_string() }
        );
        assert_eq!(
            VersionInput::from(json!(0.1)),
            VersionInput::Other { type_name: "float", value: "0.1".to_string() }
        );
        assert_eq!(
            VersionInput::from(toml::Value::Integer(1)),
            VersionInput::Other { type_name: "integer", value: "1".to_string() }
        );
    }
}
