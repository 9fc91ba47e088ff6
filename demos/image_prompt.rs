/// Image prompt example — builds full character prompts from the three
/// built-in registries.
///
/// Run with: cargo run --example image_prompt

use condition_axis::core::generator::EntityGenerator;
use condition_axis::core::prompt::{negative_prompt, to_prompt, PromptBuilder};
use condition_axis::presets;

fn main() {
    let character = presets::character().expect("Failed to load character preset");
    let facial = presets::facial().expect("Failed to load facial preset");
    let occupation = presets::occupation().expect("Failed to load occupation preset");

    // --- One reproducible character ---
    let state = character.generator().generate(Some(42));
    println!("=== Seed 42 ===");
    for (axis, value) in state.iter() {
        println!("  {:<14} {}", axis, value);
    }
    println!("  prompt: {}\n", to_prompt(&state));

    // --- Full entities: character + face + occupation ---
    let entities = EntityGenerator::new()
        .with_system("character", &character)
        .with_system("facial", &facial)
        .with_system("occupation", &occupation);

    println!("=== Styled batch ===");
    for entity in entities.generate_batch(1000, 5) {
        let prompt = PromptBuilder::new()
            .style("oil painting portrait")
            .part(&entity.to_prompt())
            .details("muted lantern light")
            .quality_tags(&["highly detailed", "sharp focus"])
            .build();
        println!("[{}] {}", entity.seed, prompt);
    }
    println!("negative: {}", negative_prompt(&["cartoonish", "anime"]));

    // --- Unseeded draws differ from run to run ---
    println!("\n=== Unseeded ===");
    for _ in 0..3 {
        println!("  {}", to_prompt(&occupation.generator().generate(None)));
    }
}
