//! # Print Constants
//!
//! Annotation vocabulary, synthesized artifact names and schema limits shared by
//! the scanner, the enhancer and the runtime resolver.
//!
//! The annotation keys are a data format: schemas authored for the host
//! ecosystem carry them verbatim, so they must not be renamed.

/// Annotation keys recognised on entity fields and action parameters
pub mod annotations {
    // Queue source
    pub const QUEUE: &str = "@print.queue";
    pub const QUEUE_SOURCE_ENTITY: &str = "@print.queue.SourceEntity";
    pub const QUEUE_USED_IN_ACTION: &str = "@print.queue.usedInAction";

    // Copy count
    pub const NUMBER_OF_COPIES: &str = "@print.numberOfCopies";
    pub const NUMBER_OF_COPIES_USED_IN_ACTION: &str = "@print.numberOfCopies.usedInAction";

    // File content
    pub const FILE_CONTENT: &str = "@print.fileContent";
    pub const FILE_CONTENT_FILE_NAME_FIELD: &str = "@print.fileContent.fileNameField";
    pub const FILE_CONTENT_USED_IN_ACTION: &str = "@print.fileContent.usedInAction";

    // Main document
    pub const MAIN_DOCUMENT: &str = "@print.MainDocument";
    pub const MAIN_DOCUMENT_USED_IN_ACTION: &str = "@print.MainDocument.usedInAction";

    // File selector parameter of the synthesized print action
    pub const FILE_SELECTOR: &str = "@print.fileSelector";

    /// Marks a hand-written action as a print action
    pub const PRINT_ACTION: &str = "@print";
}

/// Names of the artifacts the enhancer synthesizes into the schema
pub mod synthesized {
    pub const PRINT_ACTION: &str = "print";
    pub const QUEUE_PARAM: &str = "qnameID";
    pub const COPIES_PARAM: &str = "copies";
    pub const FILE_SELECTOR_PARAM: &str = "fileName";

    pub const QUEUE_LOOKUP: &str = "PrintServiceQueues";
    pub const FILES_LOOKUP: &str = "PrintServiceFiles";

    pub const QUEUE_TEMPLATE: &str = "PrintService.Queues";
    pub const FILES_TEMPLATE: &str = "PrintService.Files";

    /// Prefix of the positional key parameters of the files lookup
    pub const ENTITY_KEY_PREFIX: &str = "entityKey";

    pub const PRINT_LABEL: &str = "{i18n>PRINT}";
    pub const QUEUE_LABEL: &str = "{i18n>PRINT_QUEUE}";
    pub const COPIES_LABEL: &str = "{i18n>NUMBER_OF_COPIES}";
    pub const FILE_LABEL: &str = "{i18n>PRINT_FILE}";
}

/// Maximum number of key fields a printable entity may declare.
///
/// The files lookup encodes key values as the fixed parameters
/// `entityKey1..entityKey10`.
pub const MAX_KEY_FIELDS: usize = 10;

/// Copy count proposed by the synthesized print action
pub const DEFAULT_COPIES: u32 = 1;

/// Queues listed by the console printer when none are configured
pub const DEFAULT_CONSOLE_QUEUES: &[&str] = &[
    "DEFAULT_PRINTER_1",
    "DEFAULT_PRINTER_2",
    "DEFAULT_PRINTER_3",
    "HP_LASERJET_PRO",
    "CANON_IMAGECLASS",
    "XEROX_WORKCENTRE",
    "OFFICE_PRINTER_01",
    "OFFICE_PRINTER_02",
];
