pub mod xml;

pub use self::xml::{XmlAttribute, XmlDocument, XmlNode};
