/// Doctor roster entry shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doctor {
    pub id: u64,
    pub name: String,
    pub specialization: String,
    pub department: Option<String>,
    pub available: bool,
}
