pub mod config;
pub mod links;
pub mod parser;
pub mod prompt;
pub mod scanner;
pub mod validator;

// Re-export commonly used types
pub use config::{read_config, ConfigError, ConsistencyMode, ValidatorConfig};
pub use links::{BrokenLink, LinkChecker, LinkError};
pub use parser::{extract_references, ParseError, Parser};
pub use prompt::{PromptError, PromptGenerator};
pub use scanner::{is_template_file, ScanError, Scanner};
pub use validator::{
    checker_for_mode, DocConsistencyChecker, Inconsistency, InconsistencyKind,
    PairwiseChecker, ValidateError, ValidationResult, Validator,
};
