#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Department {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}
