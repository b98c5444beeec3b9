// Doxygen XML parsing

pub mod class_doc;
pub mod description;
pub mod doxygen;
pub mod xml;

pub use class_doc::*;
pub use description::*;
pub use doxygen::*;
pub use xml::XmlNode;
