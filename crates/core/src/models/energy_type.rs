use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The generation source of a contract's energy.
///
/// The listing service stores energy type as free text, so any value outside
/// the known set is kept verbatim in `Other` instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnergyType {
    Solar,
    Wind,
    NaturalGas,
    Nuclear,
    Hydro,
    Coal,
    Other(String),
}

impl EnergyType {
    /// The known energy types, in the order the marketplace presents them.
    pub const KNOWN: [EnergyType; 6] = [
        EnergyType::Solar,
        EnergyType::Wind,
        EnergyType::NaturalGas,
        EnergyType::Nuclear,
        EnergyType::Hydro,
        EnergyType::Coal,
    ];

    /// Wire representation, e.g. `"Natural Gas"`.
    pub fn as_str(&self) -> &str {
        match self {
            EnergyType::Solar => "Solar",
            EnergyType::Wind => "Wind",
            EnergyType::NaturalGas => "Natural Gas",
            EnergyType::Nuclear => "Nuclear",
            EnergyType::Hydro => "Hydro",
            EnergyType::Coal => "Coal",
            EnergyType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EnergyType::Other(_))
    }
}

impl From<&str> for EnergyType {
    fn from(s: &str) -> Self {
        match s {
            "Solar" => EnergyType::Solar,
            "Wind" => EnergyType::Wind,
            "Natural Gas" => EnergyType::NaturalGas,
            "Nuclear" => EnergyType::Nuclear,
            "Hydro" => EnergyType::Hydro,
            "Coal" => EnergyType::Coal,
            other => EnergyType::Other(other.to_string()),
        }
    }
}

impl From<String> for EnergyType {
    fn from(s: String) -> Self {
        match EnergyType::from(s.as_str()) {
            EnergyType::Other(_) => EnergyType::Other(s),
            known => known,
        }
    }
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EnergyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EnergyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EnergyType::from(s))
    }
}
