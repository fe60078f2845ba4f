pub struct HeroSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
}

/// Roster provisioned by the initial migration. Registering a username that
/// matches one of these names (case-insensitively) yields a hero account.
pub const HERO_ROSTER: &[HeroSeed] = &[
    HeroSeed { name: "Aquaman", description: "King of Atlantis", price: 120.0 },
    HeroSeed { name: "Bane", description: "Venom-fuelled strategist", price: 90.0 },
    HeroSeed { name: "Batman", description: "The Dark Knight of Gotham", price: 200.0 },
    HeroSeed { name: "Brainiac", description: "Collector of worlds", price: 150.0 },
    HeroSeed { name: "Canary", description: "Sonic cry specialist", price: 80.0 },
    HeroSeed { name: "Darkseid", description: "Ruler of Apokolips", price: 250.0 },
    HeroSeed { name: "Flash", description: "Fastest man alive", price: 140.0 },
    HeroSeed { name: "Greenlantern", description: "Wielder of the power ring", price: 130.0 },
    HeroSeed { name: "HawkGirl", description: "Thanagarian warrior", price: 95.0 },
    HeroSeed { name: "Joker", description: "Clown prince of crime", price: 66.0 },
    HeroSeed { name: "Lobo", description: "Intergalactic bounty hunter", price: 110.0 },
    HeroSeed { name: "NightWing", description: "Protector of Bludhaven", price: 85.0 },
    HeroSeed { name: "SolomonGrundy", description: "Born on a Monday", price: 60.0 },
    HeroSeed { name: "Superman", description: "The Man of Steel", price: 300.0 },
    HeroSeed { name: "Vixen", description: "Channels the animal kingdom", price: 75.0 },
    HeroSeed { name: "WonderWoman", description: "Amazon princess", price: 220.0 },
];

pub mod reviews {

    pub const MIN_RATING: i32 = 1;

    pub const MAX_RATING: i32 = 5;

    pub const MAX_TEXT_LEN: usize = 5000;
}

pub mod requests {

    pub const MAX_TITLE_LEN: usize = 200;

    pub const MAX_FIELD_LEN: usize = 5000;
}
