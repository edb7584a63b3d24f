/// Preset commands offered as one-click buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickCommand {
    Day,
    Night,
    ClearWeather,
    Rain,
    List,
}

impl QuickCommand {
    pub const ALL: [QuickCommand; 5] = [
        QuickCommand::Day,
        QuickCommand::Night,
        QuickCommand::ClearWeather,
        QuickCommand::Rain,
        QuickCommand::List,
    ];

    pub fn command(&self) -> &'static str {
        match self {
            QuickCommand::Day => "time set day",
            QuickCommand::Night => "time set night",
            QuickCommand::ClearWeather => "weather clear",
            QuickCommand::Rain => "weather rain",
            QuickCommand::List => "list",
        }
    }

    /// Short name used by the terminal panel (`/quick day`).
    pub fn name(&self) -> &'static str {
        match self {
            QuickCommand::Day => "day",
            QuickCommand::Night => "night",
            QuickCommand::ClearWeather => "clear",
            QuickCommand::Rain => "rain",
            QuickCommand::List => "list",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|quick| quick.name().eq_ignore_ascii_case(name))
    }
}
