//! Domain constants.

/// Name of the enumeration whose member comments carry user-facing documentation.
pub const DEFAULT_PROPERTY_ENUM: &str = "VehicleProperty";

/// Annotation key whose values are additionally collected as data enum tags.
pub const DATA_ENUM_ANNOTATION: &str = "data_enum";

/// Indentation width of the emitted JSON document.
pub const JSON_INDENT: &[u8] = b"    ";

/// Keywords recognized by the header scanner and block extractor.
pub const KW_PACKAGE: &str = "package";
pub const KW_IMPORT: &str = "import";
pub const KW_ENUM: &str = "enum";
