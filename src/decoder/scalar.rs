/// Broad category of a scalar, used to reject scalar reads a container does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Bool,
    Integer,
    Float,
}

/// A leaf value parsed from the text of an element.
pub trait Scalar: Sized {
    const KIND: ScalarKind;
    /// Human readable type name for error messages.
    const NAME: &'static str;

    fn from_text(text: &str) -> Option<Self>;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Text;
    const NAME: &'static str = "a string";

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }
}

/// Only the literal tokens `true` and `false` are booleans.
impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;
    const NAME: &'static str = "a bool";

    fn from_text(text: &str) -> Option<Self> {
        match text {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

macro_rules! impl_scalar_from_str {
    ($kind: expr, $($t: ty),+) => {
        $(
            impl Scalar for $t {
                const KIND: ScalarKind = $kind;
                const NAME: &'static str = concat!("a `", stringify!($t), "`");

                fn from_text(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )+
    };
}

impl_scalar_from_str!(ScalarKind::Integer, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_scalar_from_str!(ScalarKind::Float, f32, f64);
