/// Static generator catalog. Order is display order.

/// Immutable definition of a purchasable generator.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorDef {
    /// Stable identifier, used as the key in save data.
    pub id: &'static str,
    /// Default-locale display name.
    pub name: &'static str,
    /// Default-locale description.
    pub description: &'static str,
    /// Cost of the first unit.
    pub base_cost: f64,
    /// Matter per second contributed by each owned unit.
    pub base_production: f64,
    pub icon: &'static str,
}

pub const CATALOG: &[GeneratorDef] = &[
    GeneratorDef {
        id: "stardust_collector",
        name: "Stardust Collector",
        description: "Automated drones that gather trace cosmic dust.",
        base_cost: 15.0,
        base_production: 0.5,
        icon: "✨",
    },
    GeneratorDef {
        id: "asteroid_miner",
        name: "Asteroid Miner",
        description: "Drills extracting heavy metals from space rocks.",
        base_cost: 100.0,
        base_production: 4.0,
        icon: "🪨",
    },
    GeneratorDef {
        id: "nebula_condenser",
        name: "Nebula Condenser",
        description: "Compresses gas clouds into tangible matter.",
        base_cost: 1_100.0,
        base_production: 22.0,
        icon: "🌫",
    },
    GeneratorDef {
        id: "star_forge",
        name: "Star Forge",
        description: "A megastructure that births stars to harvest fusion byproducts.",
        base_cost: 12_000.0,
        base_production: 95.0,
        icon: "☀",
    },
    GeneratorDef {
        id: "black_hole_siphon",
        name: "Black Hole Siphon",
        description: "Extracts matter from the event horizon of singularities.",
        base_cost: 130_000.0,
        base_production: 450.0,
        icon: "⚫",
    },
    GeneratorDef {
        id: "galactic_engine",
        name: "Galactic Engine",
        description: "Moves entire galaxies to collide and harvest the debris.",
        base_cost: 1_400_000.0,
        base_production: 2_800.0,
        icon: "🌌",
    },
];

/// Catalog index of an identifier.
pub fn index_of(id: &str) -> Option<usize> {
    CATALOG.iter().position(|def| def.id == id)
}
