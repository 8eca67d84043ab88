use serde::{Deserialize, Deserializer, Serialize};

/// Full persisted inventory snapshot, the root of `contents.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct State {
    /// Opaque list carried through every mutation untouched.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub containers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub freezers: Vec<Freezer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Freezer {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contents: Vec<Item>,
}

/// A food entry. `(name, date)` is the identity used when moving containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub containers: Vec<String>,
}

/// Payload for adding a new item to a freezer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub date: String,
    pub containers: Vec<String>,
}

/// What a move did with the container once it left its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Appended to an existing item with the same name and date.
    Merged,
    /// A new item was created in the destination freezer.
    Created,
    /// Destination freezer missing; the container is gone.
    Dropped,
    /// Neither the container nor the destination exists. Nothing changed.
    Untracked,
}

/// How a move reacts to an unknown destination freezer or container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// Validate before removing anything; unknown targets are errors.
    #[default]
    Strict,
    /// Remove first and re-add only if the destination exists.
    Lossy,
}

impl std::str::FromStr for MovePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(MovePolicy::Strict),
            "lossy" => Ok(MovePolicy::Lossy),
            other => Err(format!(
                "unknown move policy '{}', expected 'strict' or 'lossy'",
                other
            )),
        }
    }
}

impl std::fmt::Display for MovePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovePolicy::Strict => write!(f, "strict"),
            MovePolicy::Lossy => write!(f, "lossy"),
        }
    }
}

impl State {
    /// First freezer with the given name. Later duplicates are never returned.
    pub fn freezer(&self, name: &str) -> Option<&Freezer> {
        self.freezers.iter().find(|f| f.name == name)
    }

    pub fn freezer_mut(&mut self, name: &str) -> Option<&mut Freezer> {
        self.freezers.iter_mut().find(|f| f.name == name)
    }

    /// First item (in freezer order) holding the container.
    pub fn item_holding(&self, container: &str) -> Option<&Item> {
        self.freezers
            .iter()
            .flat_map(|f| f.contents.iter())
            .find(|item| item.holds(container))
    }

    pub fn container_count(&self) -> usize {
        self.freezers
            .iter()
            .flat_map(|f| f.contents.iter())
            .map(|item| item.containers.len())
            .sum()
    }
}

impl Item {
    pub fn new(name: impl Into<String>, date: impl Into<String>, containers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            containers,
        }
    }

    pub fn holds(&self, container: &str) -> bool {
        self.containers.iter().any(|c| c == container)
    }

    pub fn same_identity(&self, other: &Item) -> bool {
        self.name == other.name && self.date == other.date
    }
}

impl From<NewItem> for Item {
    fn from(value: NewItem) -> Self {
        Item::new(value.name, value.date, value.containers)
    }
}

// 舊版檔案中的空清單會被寫成 null
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pascal_case_field_names() {
        let state = State {
            containers: vec!["bag".to_string()],
            freezers: vec![Freezer {
                name: "A".to_string(),
                contents: vec![Item::new("Pie", "2021", vec!["c1".to_string()])],
            }],
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "Containers": ["bag"],
                "Freezers": [{
                    "Name": "A",
                    "Contents": [{"Name": "Pie", "Date": "2021", "Containers": ["c1"]}]
                }]
            })
        );
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let raw = r#"{
            "Containers": null,
            "Freezers": [{"Name": "A", "Contents": null}]
        }"#;

        let state: State = serde_json::from_str(raw).unwrap();
        assert!(state.containers.is_empty());
        assert_eq!(state.freezers.len(), 1);
        assert!(state.freezers[0].contents.is_empty());

        let written = serde_json::to_value(&state).unwrap();
        assert_eq!(written["Containers"], json!([]));
        assert_eq!(written["Freezers"][0]["Contents"], json!([]));
    }

    #[test]
    fn test_move_policy_parsing() {
        assert_eq!("strict".parse::<MovePolicy>().unwrap(), MovePolicy::Strict);
        assert_eq!(" Lossy ".parse::<MovePolicy>().unwrap(), MovePolicy::Lossy);
        assert!("sloppy".parse::<MovePolicy>().is_err());
        assert_eq!(MovePolicy::default(), MovePolicy::Strict);
    }

    #[test]
    fn test_first_freezer_wins() {
        let state = State {
            containers: vec![],
            freezers: vec![
                Freezer {
                    name: "Dup".to_string(),
                    contents: vec![Item::new("First", "1", vec!["a".to_string()])],
                },
                Freezer {
                    name: "Dup".to_string(),
                    contents: vec![],
                },
            ],
        };

        assert_eq!(state.freezer("Dup").unwrap().contents.len(), 1);
        assert!(state.freezer("Missing").is_none());
        assert_eq!(state.item_holding("a").unwrap().name, "First");
        assert_eq!(state.container_count(), 1);
    }
}
