use serde::Serialize;

/// Latitude header variants, highest priority first
pub const LATITUDE_COLUMNS: &[&str] = &["Lat.", "Lat"];

/// Longitude header variants, highest priority first
pub const LONGITUDE_COLUMNS: &[&str] = &["Long.", "Long"];

/// Age header variants. The second is the annotated phrasing used by newer
/// releases of the AADR annotation table.
pub const AGE_COLUMNS: &[&str] = &[
    "Date mean in BP in years before 1950 CE",
    "Date mean in BP in years before 1950 CE [OxCal mu for a direct radiocarbon date, and average of range for a contextual date]",
];

pub const GENETIC_ID_COLUMNS: &[&str] = &[
    "Genetic ID (suffixes: \".DG\" is a high coverage shotgun genome with diploid genotype calls, \".AG\" is shotgun data with each position in the genome represented by a randomly chosen sequence, \".HO\" is Affymetrix Human Origins genotype data)",
    "Genetic ID",
];

pub const MASTER_ID_COLUMN: &str = "Master ID";
pub const GROUP_ID_COLUMN: &str = "Group ID";
pub const LOCALITY_COLUMN: &str = "Locality";
pub const PUBLICATION_COLUMN: &str = "Publication abbreviation";
pub const COUNTRY_COLUMN: &str = "Country";
pub const CULTURE_COLUMN: &str = "Culture";
pub const SEX_COLUMN: &str = "Sex";

/// Any column containing this marker is treated as a genetic id column
pub const GENETIC_ID_MARKER: &str = "Genetic ID";

/// Fallback for a missing genetic id
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Fallback for every other missing text field
pub const NOT_AVAILABLE_TEXT: &str = "N/A";

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Resolved semantic view of a record. Built on demand by the field resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalFields {
    pub genetic_id: String,
    pub master_id: String,
    pub group_id: String,
    pub locality: String,
    pub publication: String,
    pub country: String,
    pub culture: String,
    pub sex: String,

    /// Age in years BP; 0 when absent or unparseable
    pub age: f64,

    /// `None` when the record cannot be placed on the map
    pub position: Option<LatLng>,

    /// Every other present column, in source order
    pub extra: Vec<(String, String)>,
}

impl CanonicalFields {
    pub fn is_mappable(&self) -> bool {
        self.position.is_some()
    }

    pub fn has_known_age(&self) -> bool {
        self.age > 0.0
    }

    /// Values shown to the user, fallbacks included
    pub fn display_values(&self) -> [&str; 8] {
        [
            &self.genetic_id,
            &self.master_id,
            &self.group_id,
            &self.locality,
            &self.publication,
            &self.country,
            &self.culture,
            &self.sex,
        ]
    }
}
