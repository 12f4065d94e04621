use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps customer contact details so they never leak through `tracing` or
/// `{:?}`. Only the last two characters are shown.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn masked(&self) -> String {
        let raw = self.0.as_ref();
        let visible = raw.chars().count().saturating_sub(2);
        raw.chars()
            .enumerate()
            .map(|(i, c)| if i < visible { '*' } else { c })
            .collect()
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Responses need the real value; masking is for log output only.
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_is_masked_in_logs() {
        let phone = Masked("08031234567".to_string());
        assert_eq!(format!("{}", phone), "*********67");
        assert_eq!(format!("{:?}", phone), "*********67");
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"08031234567\"");
    }
}
