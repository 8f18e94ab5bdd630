use serde::Serialize;

use crate::decoder::{Decode, Decoder, XmlTag};
use crate::err::Result;

/// Error reported by the API.
///
/// Validation failures come as a list of attributed text elements,
/// `<errors><error field="account.email" symbol="invalid_email">is invalid</error></errors>`,
/// other failures as a single `<error>` with `symbol` and `description` children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub field: Option<String>,
    pub symbol: String,
    pub message: String,
    pub lang: Option<String>,
}

impl XmlTag for ApiError {
    const TAG: &'static str = "error";
}

impl Decode for ApiError {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();

        let symbol = match decoder.attribute("symbol") {
            Some(symbol) => symbol.to_owned(),
            None => keyed.decode_string("symbol")?,
        };

        let (message, lang) = if keyed.contains("description") {
            let description = keyed.decode::<Description>("description")?;
            (description.text, description.lang)
        } else {
            (decoder.single_value().decode_string()?, None)
        };

        Ok(ApiError {
            field: decoder.attribute("field").map(str::to_owned),
            symbol,
            message,
            lang: lang.or_else(|| decoder.attribute("lang").map(str::to_owned)),
        })
    }
}

struct Description {
    text: String,
    lang: Option<String>,
}

impl Decode for Description {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(Description {
            text: decoder.single_value().decode_string()?,
            lang: decoder.attribute("lang").map(str::to_owned),
        })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} {} ({})", field, self.message, self.symbol),
            None => write!(f, "{} ({})", self.message, self.symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use crate::err::DecodingError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decodes_validation_errors() {
        let errors: Vec<ApiError> = decode(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<errors>
  <error field="subscription.account.email" symbol="invalid_email" lang="en-US">is invalid</error>
  <error field="subscription.plan_code" symbol="blank">can&apos;t be blank</error>
</errors>"#,
        )
        .unwrap();

        assert_eq!(
            errors,
            vec![
                ApiError {
                    field: Some("subscription.account.email".to_owned()),
                    symbol: "invalid_email".to_owned(),
                    message: "is invalid".to_owned(),
                    lang: Some("en-US".to_owned()),
                },
                ApiError {
                    field: Some("subscription.plan_code".to_owned()),
                    symbol: "blank".to_owned(),
                    message: "can't be blank".to_owned(),
                    lang: None,
                },
            ]
        );
        assert_eq!(
            errors[1].to_string(),
            "subscription.plan_code can't be blank (blank)"
        );
    }

    #[test]
    fn test_decodes_single_error() {
        let error: ApiError = decode(
            br#"<error>
  <symbol>not_found</symbol>
  <description lang="en-US">Couldn't find Account with account_code = nobody</description>
</error>"#,
        )
        .unwrap();

        assert_eq!(error.field, None);
        assert_eq!(error.symbol, "not_found");
        assert_eq!(
            error.message,
            "Couldn't find Account with account_code = nobody"
        );
        assert_eq!(error.lang.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_error_without_symbol() {
        let err = decode::<ApiError>(b"<error>something broke</error>").unwrap_err();
        assert!(matches!(err, DecodingError::MissingField { key, .. } if key == "symbol"));
    }
}
