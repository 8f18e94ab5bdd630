/// Declares an enum decoded from the text of a leaf element, e.g. `<state>active</state>`.
///
/// Unknown text fails with `DecodingError::UnknownValue`.
macro_rules! xml_text_enum {
    (
        $(#[$meta: meta])*
        $vis: vis enum $name: ident ($what: literal) {
            $($(#[$variant_meta: meta])* $variant: ident => $text: literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::err::DecodingError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::err::DecodingError::UnknownValue {
                        what: $what,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl $crate::decoder::Decode for $name {
            fn decode(decoder: &$crate::decoder::Decoder<'_>) -> $crate::err::Result<Self> {
                decoder.single_value().decode_string()?.parse()
            }
        }
    };
}
