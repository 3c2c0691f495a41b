use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A club record as authored in seed data, before it has a row id.
///
/// Field order matches the column order of the bulk insert. Empty strings are
/// stored verbatim rather than as NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub short_code: String,
    pub city: String,
    pub stadium: String,
    pub manager_name: String,
    pub founding_year: i32,
    pub logo_url: String,
    pub usual_formation: String,
    /// Most recent season the club played in the top division.
    pub last_premier_league_year: i32,
}

/// A stored row of the `teams` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub team_id: i32,
    pub name: String,
    pub short_code: Option<String>,
    pub city: Option<String>,
    pub stadium: Option<String>,
    pub manager_name: Option<String>,
    pub founding_year: Option<i32>,
    pub logo_url: Option<String>,
    pub usual_formation: Option<String>,
    pub last_premier_league_year: Option<i32>,
}

impl Team {
    /// Returns true when every seeded field of this row equals `record`.
    pub fn matches(&self, record: &NewTeam) -> bool {
        self.name == record.name
            && self.short_code.as_deref() == Some(record.short_code.as_str())
            && self.city.as_deref() == Some(record.city.as_str())
            && self.stadium.as_deref() == Some(record.stadium.as_str())
            && self.manager_name.as_deref() == Some(record.manager_name.as_str())
            && self.founding_year == Some(record.founding_year)
            && self.logo_url.as_deref() == Some(record.logo_url.as_str())
            && self.usual_formation.as_deref() == Some(record.usual_formation.as_str())
            && self.last_premier_league_year == Some(record.last_premier_league_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arsenal() -> NewTeam {
        NewTeam {
            name: "Arsenal".into(),
            short_code: "ARS".into(),
            city: "London".into(),
            stadium: "Emirates Stadium".into(),
            manager_name: "Mikel Arteta".into(),
            founding_year: 1886,
            logo_url: "https://upload.wikimedia.org/wikipedia/en/5/53/Arsenal_FC.svg".into(),
            usual_formation: "4-3-3".into(),
            last_premier_league_year: 2025,
        }
    }

    fn stored(record: &NewTeam) -> Team {
        Team {
            team_id: 18,
            name: record.name.clone(),
            short_code: Some(record.short_code.clone()),
            city: Some(record.city.clone()),
            stadium: Some(record.stadium.clone()),
            manager_name: Some(record.manager_name.clone()),
            founding_year: Some(record.founding_year),
            logo_url: Some(record.logo_url.clone()),
            usual_formation: Some(record.usual_formation.clone()),
            last_premier_league_year: Some(record.last_premier_league_year),
        }
    }

    #[test]
    fn test_matches_identical_row() {
        let record = arsenal();
        assert!(stored(&record).matches(&record));
    }

    #[test]
    fn test_matches_rejects_null_for_empty_string() {
        let mut record = arsenal();
        record.usual_formation = String::new();
        let mut row = stored(&record);
        assert!(row.matches(&record));

        row.usual_formation = None;
        assert!(!row.matches(&record));
    }

    #[test]
    fn test_matches_rejects_missing_last_year() {
        let record = arsenal();
        let mut row = stored(&record);
        row.last_premier_league_year = None;
        assert!(!row.matches(&record));
    }

    #[test]
    fn test_new_team_deserializes_from_json() {
        let json = r#"{
            "name": "Wigan Athletic",
            "short_code": "WIG",
            "city": "Wigan",
            "stadium": "DW Stadium",
            "manager_name": "",
            "founding_year": 1932,
            "logo_url": "https://upload.wikimedia.org/wikipedia/en/3/30/Wigan_Athletic_FC_logo.svg",
            "usual_formation": "",
            "last_premier_league_year": 2013
        }"#;

        let team: NewTeam = serde_json::from_str(json).unwrap();
        assert_eq!(team.short_code, "WIG");
        assert!(team.manager_name.is_empty());
        assert_eq!(team.last_premier_league_year, 2013);
    }
}
