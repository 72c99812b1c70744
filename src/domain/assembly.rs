use serde::{Deserialize, Serialize};

pub type AssemblyId = String;
pub type PoliticalPartyId = String;

/// Kind of legislative body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssemblyType {
    AssembleeNationale,
    Senat,
    ParlementEuropeen,
}

impl AssemblyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssemblyType::AssembleeNationale => "ASSEMBLEE_NATIONALE",
            AssemblyType::Senat => "SENAT",
            AssemblyType::ParlementEuropeen => "PARLEMENT_EUROPEEN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub id: AssemblyId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliticalParty {
    pub id: PoliticalPartyId,
    pub name: String,
    pub acronym: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_type_text() {
        let json = serde_json::to_string(&AssemblyType::ParlementEuropeen).unwrap();
        assert_eq!(json, format!("\"{}\"", AssemblyType::ParlementEuropeen.as_str()));
    }
}
