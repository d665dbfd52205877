/// Help listing groups. Listed in [`SECTION_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    General,
    Help,
    QueryBuffer,
    InputOutput,
    Transaction,
    Variables,
    Formatting,
    Connection,
}

pub const SECTION_ORDER: [Section; 8] = [
    Section::General,
    Section::Help,
    Section::QueryBuffer,
    Section::InputOutput,
    Section::Transaction,
    Section::Variables,
    Section::Formatting,
    Section::Connection,
];

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::General => "General",
            Section::Help => "Help",
            Section::QueryBuffer => "Query Buffer",
            Section::InputOutput => "Input/Output",
            Section::Transaction => "Transaction",
            Section::Variables => "Variables",
            Section::Formatting => "Formatting",
            Section::Connection => "Connection",
        }
    }
}
