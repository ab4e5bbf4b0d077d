//! Clinical quality measure domain models
//!
//! This module defines the canonical measure representation consumed by the
//! calculation service, plus the legacy measure record it can be converted
//! from. The canonical tree serializes with `_type` discriminators so that
//! polymorphic sub-objects round-trip through the engine unchanged.

use crate::domain::ids::MeasureId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn measure_type() -> String {
    "CQM::Measure".to_string()
}

fn population_set_type() -> String {
    "CQM::PopulationSet".to_string()
}

fn stratification_type() -> String {
    "CQM::Stratification".to_string()
}

fn statement_reference_type() -> String {
    "CQM::StatementReference".to_string()
}

fn observation_type() -> String {
    "CQM::Observation".to_string()
}

fn default_calculation_method() -> String {
    "patient".to_string()
}

/// Reference to a CQL statement within a measure library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementReference {
    /// Type discriminator preserved for the calculation service
    #[serde(rename = "_type", default = "statement_reference_type")]
    pub model_type: String,

    /// Name of the CQL library containing the statement
    pub library_name: String,

    /// Name of the statement
    pub statement_name: String,

    /// HQMF id of the population this statement defines, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hqmf_id: Option<String>,
}

impl StatementReference {
    /// Creates a statement reference without an HQMF id
    pub fn new(library_name: impl Into<String>, statement_name: impl Into<String>) -> Self {
        Self {
            model_type: statement_reference_type(),
            library_name: library_name.into(),
            statement_name: statement_name.into(),
            hqmf_id: None,
        }
    }

    /// Sets the HQMF id
    pub fn with_hqmf_id(mut self, hqmf_id: impl Into<String>) -> Self {
        self.hqmf_id = Some(hqmf_id.into());
        self
    }
}

/// Measure observation (e.g., a median or sum over an episode attribute)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Type discriminator preserved for the calculation service
    #[serde(rename = "_type", default = "observation_type")]
    pub model_type: String,

    /// Aggregation applied across results (e.g., "Median")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_type: Option<String>,

    /// HQMF id of the observation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hqmf_id: Option<String>,

    /// CQL function evaluated per population member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_function: Option<StatementReference>,
}

/// A named refinement of a population set
///
/// A stratification always belongs to exactly one population set;
/// `stratification_id` is unique within that set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stratification {
    /// Type discriminator preserved for the calculation service
    #[serde(rename = "_type", default = "stratification_type")]
    pub model_type: String,

    /// Identifier unique within the owning population set
    pub stratification_id: String,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// HQMF id of the stratification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hqmf_id: Option<String>,

    /// CQL statement defining the stratum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<StatementReference>,
}

impl Stratification {
    /// Creates a stratification with the given id and title
    pub fn new(stratification_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            model_type: stratification_type(),
            stratification_id: stratification_id.into(),
            title: title.into(),
            hqmf_id: None,
            statement: None,
        }
    }
}

/// A named grouping of population criteria within a measure
///
/// The `populations` map is keyed by population code (IPP, DENOM, NUMER, ...).
/// `population_set_id` is unique within a measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSet {
    /// Type discriminator preserved for the calculation service
    #[serde(rename = "_type", default = "population_set_type")]
    pub model_type: String,

    /// Identifier unique within the measure
    pub population_set_id: String,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// Population criteria keyed by population code
    #[serde(default)]
    pub populations: BTreeMap<String, StatementReference>,

    /// Measure observations owned by this population set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<Observation>,

    /// Stratifications refining this population set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stratifications: Vec<Stratification>,
}

impl PopulationSet {
    /// Creates an empty population set with the given id and title
    pub fn new(population_set_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            model_type: population_set_type(),
            population_set_id: population_set_id.into(),
            title: title.into(),
            populations: BTreeMap::new(),
            observations: Vec::new(),
            stratifications: Vec::new(),
        }
    }

    /// Adds a population criterion keyed by its population code
    pub fn with_population(
        mut self,
        code: impl Into<String>,
        statement: StatementReference,
    ) -> Self {
        self.populations.insert(code.into(), statement);
        self
    }

    /// Adds a stratification
    pub fn with_stratification(mut self, stratification: Stratification) -> Self {
        self.stratifications.push(stratification);
        self
    }

    /// Adds an observation
    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }
}

/// A single clinical terminology concept within a value set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Terminology code
    pub code: String,

    /// Name of the code system (e.g., "SNOMEDCT")
    pub code_system_name: String,

    /// OID of the code system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_system_oid: Option<String>,

    /// Version of the code system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_system_version: Option<String>,

    /// Display name of the concept
    #[serde(default)]
    pub display_name: String,
}

/// A named collection of clinical terminology codes referenced by measure logic
///
/// The internal `_id` field identifies the record locally; it is stripped
/// before the value set is sent to the calculation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSet {
    /// Internal record identifier, excluded from engine serialization
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Value set OID
    pub oid: String,

    /// Display name of the value set
    #[serde(default)]
    pub display_name: String,

    /// Value set version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Concepts contained in the value set
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

/// Supplementary measure artifact (e.g., the original measure bundle)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurePackage {
    /// Original file name of the artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Base64-encoded artifact content; carried opaquely, never decoded here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Canonical clinical quality measure
///
/// Owns an ordered collection of population sets (never empty for a usable
/// measure), zero or more value sets, and an optional package artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Type discriminator preserved for the calculation service
    #[serde(rename = "_type", default = "measure_type")]
    pub model_type: String,

    /// Measure identifier
    pub id: MeasureId,

    /// Measure title
    #[serde(default)]
    pub title: String,

    /// CMS identifier (e.g., "CMS134v6")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms_id: Option<String>,

    /// HQMF set id shared across versions of the same measure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hqmf_set_id: Option<String>,

    /// Calculation method ("patient" or "episode")
    #[serde(default = "default_calculation_method")]
    pub calculation_method: String,

    /// Name of the main CQL library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_cql_library: Option<String>,

    /// Ordered population sets
    pub population_sets: Vec<PopulationSet>,

    /// Value sets referenced by the measure logic
    #[serde(default)]
    pub value_sets: Vec<ValueSet>,

    /// Supplementary artifact, not sent to the calculation service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<MeasurePackage>,
}

impl Measure {
    /// Creates a builder for constructing a measure
    pub fn builder() -> MeasureBuilder {
        MeasureBuilder::new()
    }

    /// Validates structural invariants of the measure
    ///
    /// # Errors
    ///
    /// Returns an error if the measure has no population sets, if a
    /// `population_set_id` repeats within the measure, or if a
    /// `stratification_id` repeats within its owning population set.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_sets.is_empty() {
            return Err(format!(
                "Measure {} has no population sets; a usable measure requires at least one",
                self.id
            ));
        }

        let mut seen_sets = Vec::new();
        for population_set in &self.population_sets {
            if seen_sets.contains(&population_set.population_set_id.as_str()) {
                return Err(format!(
                    "Duplicate population_set_id '{}' in measure {}",
                    population_set.population_set_id, self.id
                ));
            }
            seen_sets.push(population_set.population_set_id.as_str());

            let mut seen_strats = Vec::new();
            for stratification in &population_set.stratifications {
                if seen_strats.contains(&stratification.stratification_id.as_str()) {
                    return Err(format!(
                        "Duplicate stratification_id '{}' in population set '{}'",
                        stratification.stratification_id, population_set.population_set_id
                    ));
                }
                seen_strats.push(stratification.stratification_id.as_str());
            }
        }

        Ok(())
    }
}

/// Builder for [`Measure`]
///
/// Requires an id, a title, and at least one population set.
#[derive(Debug, Default)]
pub struct MeasureBuilder {
    id: Option<MeasureId>,
    title: Option<String>,
    cms_id: Option<String>,
    hqmf_set_id: Option<String>,
    calculation_method: Option<String>,
    main_cql_library: Option<String>,
    population_sets: Vec<PopulationSet>,
    value_sets: Vec<ValueSet>,
    package: Option<MeasurePackage>,
}

impl MeasureBuilder {
    /// Creates a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the measure id
    pub fn id(mut self, id: impl Into<String>) -> Result<Self, String> {
        self.id = Some(MeasureId::new(id)?);
        Ok(self)
    }

    /// Sets the measure title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the CMS identifier
    pub fn cms_id(mut self, cms_id: impl Into<String>) -> Self {
        self.cms_id = Some(cms_id.into());
        self
    }

    /// Sets the HQMF set id
    pub fn hqmf_set_id(mut self, hqmf_set_id: impl Into<String>) -> Self {
        self.hqmf_set_id = Some(hqmf_set_id.into());
        self
    }

    /// Sets the calculation method
    pub fn calculation_method(mut self, method: impl Into<String>) -> Self {
        self.calculation_method = Some(method.into());
        self
    }

    /// Sets the main CQL library name
    pub fn main_cql_library(mut self, library: impl Into<String>) -> Self {
        self.main_cql_library = Some(library.into());
        self
    }

    /// Appends a population set
    pub fn population_set(mut self, population_set: PopulationSet) -> Self {
        self.population_sets.push(population_set);
        self
    }

    /// Appends a value set
    pub fn value_set(mut self, value_set: ValueSet) -> Self {
        self.value_sets.push(value_set);
        self
    }

    /// Sets the package artifact
    pub fn package(mut self, package: MeasurePackage) -> Self {
        self.package = Some(package);
        self
    }

    /// Builds the measure, validating its invariants
    ///
    /// # Errors
    ///
    /// Returns an error if id or title is missing, or if validation fails.
    pub fn build(self) -> Result<Measure, String> {
        let measure = Measure {
            model_type: measure_type(),
            id: self.id.ok_or("Measure id is required")?,
            title: self.title.ok_or("Measure title is required")?,
            cms_id: self.cms_id,
            hqmf_set_id: self.hqmf_set_id,
            calculation_method: self
                .calculation_method
                .unwrap_or_else(default_calculation_method),
            main_cql_library: self.main_cql_library,
            population_sets: self.population_sets,
            value_sets: self.value_sets,
            package: self.package,
        };
        measure.validate()?;
        Ok(measure)
    }
}

/// Legacy measure record, pre-conversion
///
/// The shape produced by older measure loaders. Converted to the canonical
/// [`Measure`] at the boundary; internal code never branches on this form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyMeasure {
    /// Measure identifier
    pub id: MeasureId,

    /// Measure title
    #[serde(default)]
    pub title: String,

    /// CMS identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms_id: Option<String>,

    /// HQMF set id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hqmf_set_id: Option<String>,

    /// Population sets, already in canonical shape in the legacy record
    #[serde(default)]
    pub population_sets: Vec<PopulationSet>,

    /// Value sets owned by the legacy record
    #[serde(default)]
    pub value_sets: Vec<ValueSet>,
}

/// Measure representation decided once at the boundary
///
/// The legacy-or-canonical question is answered once, where the measure is
/// loaded; downstream code only ever handles the canonical form.
#[derive(Debug, Clone)]
pub enum MeasureSource {
    /// Legacy record requiring conversion
    Legacy(LegacyMeasure),

    /// Already-canonical measure, passed through unchanged
    Canonical(Measure),
}

impl MeasureSource {
    /// Returns the measure id regardless of representation
    pub fn id(&self) -> &MeasureId {
        match self {
            MeasureSource::Legacy(measure) => &measure.id,
            MeasureSource::Canonical(measure) => &measure.id,
        }
    }
}
