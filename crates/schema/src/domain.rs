//! Curriculum domains a lesson belongs to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ListOption;

/// One of the six ABO exam content domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Optics,
    OcularAnatomy,
    OphthalmicProducts,
    Instrumentation,
    DispensingProcedures,
    LawsRegulationsAndStandards,
}

/// A domain tag outside the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown curriculum domain '{0}'")]
pub struct UnknownDomain(pub String);

impl Domain {
    /// All domains in curriculum order.
    pub const ALL: [Domain; 6] = [
        Domain::Optics,
        Domain::OcularAnatomy,
        Domain::OphthalmicProducts,
        Domain::Instrumentation,
        Domain::DispensingProcedures,
        Domain::LawsRegulationsAndStandards,
    ];

    /// Stored value, as written in documents.
    pub fn value(self) -> &'static str {
        match self {
            Domain::Optics => "optics",
            Domain::OcularAnatomy => "ocular-anatomy",
            Domain::OphthalmicProducts => "ophthalmic-products",
            Domain::Instrumentation => "instrumentation",
            Domain::DispensingProcedures => "dispensing-procedures",
            Domain::LawsRegulationsAndStandards => "laws-regulations-and-standards",
        }
    }

    /// Title shown to editors.
    pub fn title(self) -> &'static str {
        match self {
            Domain::Optics => "Domain I: Ophthalmic Optics",
            Domain::OcularAnatomy => {
                "Domain II: Ocular Anatomy, Physiology, Pathology, and Refraction"
            }
            Domain::OphthalmicProducts => "Domain III: Ophthalmic Products",
            Domain::Instrumentation => "Domain IV. Instrumentation",
            Domain::DispensingProcedures => "Domain V. Dispensing Procedures",
            Domain::LawsRegulationsAndStandards => "Domain VI. Laws, Regulations, and Standards",
        }
    }

    /// The enumerated list used by the lesson `domain` field.
    pub fn list_options() -> Vec<ListOption> {
        Self::ALL
            .iter()
            .map(|d| ListOption::new(d.title(), d.value()))
            .collect()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.value() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}
