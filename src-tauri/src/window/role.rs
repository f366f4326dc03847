/// The fixed set of windows the shell can own. Each role has at most one live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindowRole {
    Main,
    Wiki,
    Pokedex,
    TypeChart,
    TypeCalculator,
    TeamBuilder,
    Smogon,
}

impl WindowRole {
    pub const ALL: [WindowRole; 7] = [
        WindowRole::Main,
        WindowRole::Wiki,
        WindowRole::Pokedex,
        WindowRole::TypeChart,
        WindowRole::TypeCalculator,
        WindowRole::TeamBuilder,
        WindowRole::Smogon,
    ];

    pub fn auxiliary() -> impl Iterator<Item = WindowRole> {
        Self::ALL.into_iter().filter(|role| !role.is_main())
    }

    pub fn is_main(self) -> bool {
        self == WindowRole::Main
    }

    /// Window label, also used as the menu id suffix.
    pub fn label(self) -> &'static str {
        match self {
            WindowRole::Main => "main",
            WindowRole::Wiki => "wiki",
            WindowRole::Pokedex => "pokedex",
            WindowRole::TypeChart => "type-chart",
            WindowRole::TypeCalculator => "type-calculator",
            WindowRole::TeamBuilder => "team-builder",
            WindowRole::Smogon => "smogon",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }

    pub fn title(self) -> &'static str {
        match self {
            WindowRole::Main => "PokéRogue",
            WindowRole::Wiki => "PokéRogue Wiki",
            WindowRole::Pokedex => "Pokédex",
            WindowRole::TypeChart => "Type Chart",
            WindowRole::TypeCalculator => "Type Calculator",
            WindowRole::TeamBuilder => "Team Builder",
            WindowRole::Smogon => "Smogon",
        }
    }

    /// Reference page for auxiliary roles. The main window's content depends on
    /// offline mode and is resolved by the launch config instead.
    pub fn url(self) -> Option<&'static str> {
        match self {
            WindowRole::Main => None,
            WindowRole::Wiki => Some("https://wiki.pokerogue.net/"),
            WindowRole::Pokedex => Some("https://pokemondb.net/pokedex/national"),
            WindowRole::TypeChart => Some("https://pokemondb.net/type"),
            WindowRole::TypeCalculator => Some("https://www.pkmn.help/defense/"),
            WindowRole::TeamBuilder => Some("https://pokepast.es/"),
            WindowRole::Smogon => Some("https://www.smogon.com/dex/sv/pokemon/"),
        }
    }

    /// Logical size used when the role's window is first created.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            WindowRole::Main => (1280.0, 749.0),
            WindowRole::TypeChart => (680.0, 720.0),
            WindowRole::TypeCalculator => (600.0, 800.0),
            _ => (1100.0, 800.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_for_every_role() {
        for role in WindowRole::ALL {
            assert_eq!(WindowRole::from_label(role.label()), Some(role));
        }
        assert_eq!(WindowRole::from_label("settings"), None);
    }

    #[test]
    fn auxiliary_roles_exclude_main_and_have_urls() {
        let aux: Vec<_> = WindowRole::auxiliary().collect();
        assert_eq!(aux.len(), 6);
        assert!(!aux.contains(&WindowRole::Main));
        assert!(aux.iter().all(|role| role.url().is_some()));
        assert!(WindowRole::Main.url().is_none());
    }
}
