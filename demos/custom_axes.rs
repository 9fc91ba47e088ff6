/// Custom axes example — defines a magic system in RON and a tech system in
/// code, then checks that their exclusion rules hold.
///
/// Run with: cargo run --example custom_axes

use condition_axis::core::prompt::to_prompt;
use condition_axis::core::registry::AxisRegistry;
use condition_axis::schema::exclusion::ExclusionRule;

const MAGIC: &str = r#"(
    axes: [
        (name: "affinity", values: ["arcane", "divine", "primal", "shadow", "elemental"]),
        (name: "proficiency", values: ["latent", "novice", "adept", "master", "transcendent"]),
        (name: "manifestation", values: ["subtle", "visible", "radiant", "volatile", "catastrophic"]),
        (name: "cost", values: ["effortless", "draining", "painful", "corrupting"]),
    ],
    weights: {
        "proficiency": {"latent": 3.0, "novice": 2.0, "adept": 1.5, "master": 0.8, "transcendent": 0.2},
    },
    policy: (
        mandatory: ["affinity", "proficiency"],
        optional: ["manifestation", "cost"],
        max_optional: 1,
    ),
    exclusions: [
        (
            trigger: ("proficiency", "latent"),
            blocked: [
                (axis: "manifestation", values: ["radiant", "volatile", "catastrophic"]),
                (axis: "cost", values: ["painful", "corrupting"]),
            ],
        ),
        (trigger: ("proficiency", "transcendent"), blocked: [(axis: "cost", values: ["effortless"])]),
    ],
)"#;

fn main() {
    // --- Magic system from RON ---
    let magic = AxisRegistry::parse_ron(MAGIC).expect("Failed to parse magic axes");
    println!("=== Magic ===");
    for state in magic.generator().generate_batch(0, 5) {
        println!("  {}", to_prompt(&state));
    }

    // --- Tech system from the builder ---
    let tech = AxisRegistry::builder()
        .axis("era", &["steam", "atomic", "digital", "post-singularity"])
        .axis("reliability", &["unstable", "temperamental", "dependable", "flawless"])
        .axis("scale", &["handheld", "vehicle", "building", "city"])
        .axis("power", &["coal", "fission", "solar", "zero-point"])
        .weights("era", &[("steam", 2.0), ("atomic", 2.0), ("digital", 3.0), ("post-singularity", 0.5)])
        .weights("reliability", &[("flawless", 0.3)])
        .mandatory(&["era", "reliability"])
        .optional(&["scale", "power"])
        .max_optional(2)
        .exclude(ExclusionRule::new("era", "steam").block("power", &["fission", "solar", "zero-point"]))
        .exclude(ExclusionRule::new("era", "post-singularity").block("reliability", &["unstable"]))
        .build()
        .expect("Failed to build tech axes");

    println!("\n=== Tech ===");
    let generator = tech.generator();
    let mut steam_with_modern_power = 0;
    for state in generator.generate_batch(0, 200) {
        if state.has("era", "steam") && state.get("power").map_or(false, |p| p != "coal") {
            steam_with_modern_power += 1;
        }
    }
    for state in generator.generate_batch(500, 5) {
        println!("  {}", to_prompt(&state));
    }
    println!("\nSteam-era states with modern power: {}", steam_with_modern_power);

    // --- Export the tech registry back to RON ---
    let exported = tech.config().to_ron().expect("Failed to export tech axes");
    println!("\n=== Tech config ===\n{}", exported);
}
