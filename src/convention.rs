//! "Async" suffix naming convention
//!
//! Asynchronous functions must be named ending in `Async`. The classifier
//! decides, for one declaration, whether the name complies and which
//! correction applies if it does not:
//!
//! 1. Non-async declarations are never flagged.
//! 2. A name ending in `Async` is compliant, even if the token also appears
//!    earlier in the name.
//! 3. A name ending in the transposed `Asycn` needs the suffix respelled.
//! 4. A name containing `Async` anywhere else needs the token moved.
//! 5. Anything else needs the suffix appended.

use serde::{Deserialize, Serialize};

/// The required suffix for asynchronous function names
pub const SUFFIX: &str = "Async";

/// The one recognised misspelling of [`SUFFIX`]
pub const MISSPELLED_SUFFIX: &str = "Asycn";

/// Diagnostic identifier shared by every violation
pub const DIAGNOSTIC_ID: &str = "AsyncConvention";

/// Human-readable diagnostic title
pub const TITLE: &str = "Wrong async name convention";

/// Diagnostic category
pub const CATEGORY: &str = "Usage";

/// Outcome of classifying one identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// No action needed
    Compliant,
    /// The name should gain the suffix
    MissingSuffix,
    /// The name ends with a known misspelling of the suffix
    MisspelledSuffix,
    /// The suffix token appears in the name, but not at the end
    MisplacedSuffix,
}

/// Classify a declaration name against the suffix convention.
///
/// Total and pure: every input yields exactly one verdict.
pub fn classify(is_async: bool, name: &str) -> Verdict {
    if !is_async || name.ends_with(SUFFIX) {
        Verdict::Compliant
    } else if name.ends_with(MISSPELLED_SUFFIX) {
        Verdict::MisspelledSuffix
    } else if name.contains(SUFFIX) {
        Verdict::MisplacedSuffix
    } else {
        Verdict::MissingSuffix
    }
}

impl Verdict {
    /// Every non-compliant verdict, in decision order
    pub const VIOLATIONS: [Verdict; 3] = [
        Verdict::MisspelledSuffix,
        Verdict::MisplacedSuffix,
        Verdict::MissingSuffix,
    ];

    pub fn is_compliant(&self) -> bool {
        matches!(self, Verdict::Compliant)
    }

    /// Stable kebab-case code, used in machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Compliant => "compliant",
            Verdict::MissingSuffix => "missing-suffix",
            Verdict::MisspelledSuffix => "misspelled-suffix",
            Verdict::MisplacedSuffix => "misplaced-suffix",
        }
    }

    /// Rule id for this verdict, e.g. `AsyncConvention/missing-suffix`
    pub fn rule_id(&self) -> String {
        format!("{DIAGNOSTIC_ID}/{}", self.code())
    }

    /// Diagnostic message shown to the user
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Verdict::Compliant => None,
            Verdict::MissingSuffix => Some("\"Async\" postfix is absent"),
            Verdict::MisspelledSuffix => Some("Wrong \"Async\" postfix"),
            Verdict::MisplacedSuffix => Some("Wrong position of the \"Async\" postfix"),
        }
    }

    /// Short title of the fix action
    pub fn fix_title(&self) -> Option<&'static str> {
        match self {
            Verdict::Compliant => None,
            Verdict::MissingSuffix => Some("Add \"Async\" postfix"),
            Verdict::MisspelledSuffix => Some("Replace to \"Async\""),
            Verdict::MisplacedSuffix => Some("Move \"Async\" to the end of the method name"),
        }
    }

    /// Longer description of what the fix does
    pub fn fix_description(&self) -> Option<&'static str> {
        match self {
            Verdict::Compliant => None,
            Verdict::MissingSuffix => Some("Append `Async` to the end of the name"),
            Verdict::MisspelledSuffix => {
                Some("Replace the trailing misspelled token with `Async`")
            }
            Verdict::MisplacedSuffix => Some("Move the `Async` token to the end of the name"),
        }
    }

    /// The name the fix would produce.
    ///
    /// This is a suggestion only; nothing is renamed.
    pub fn suggested_name(&self, name: &str) -> Option<String> {
        match self {
            Verdict::Compliant => None,
            Verdict::MissingSuffix => Some(format!("{name}{SUFFIX}")),
            Verdict::MisspelledSuffix => {
                let stem = name.strip_suffix(MISSPELLED_SUFFIX).unwrap_or(name);
                Some(format!("{stem}{SUFFIX}"))
            }
            Verdict::MisplacedSuffix => Some(format!("{}{SUFFIX}", name.replace(SUFFIX, ""))),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
