use dungeon::{DungeonConfig, GenerateError, audit, generate_dungeon};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn check_seed(config: DungeonConfig, seed: u64) -> Result<(), String> {
    let dungeon = generate_dungeon(config, seed)
        .map_err(|error: GenerateError| format!("generation failed on seed {seed}: {error}"))?;
    audit(&dungeon).map_err(|violation| format!("seed {seed} with {config:?}: {violation}"))
}

#[test]
fn test_invariant_fuzz_default_config() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));

    runner
        .run(&any::<u64>(), |seed| {
            check_seed(DungeonConfig::default(), seed).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("default dungeons should preserve structural invariants");
}

#[test]
fn test_invariant_fuzz_varied_configs() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(48));
    let inputs = (
        any::<u64>(),
        16_usize..96,
        16_usize..64,
        1_usize..4,
        2_usize..6,
        0_usize..3,
        0_usize..3,
    );

    runner
        .run(&inputs, |(seed, width, height, corridor_margin, room_size_min, spread, slack)| {
            let room_size_max = room_size_min + spread;
            let panel_size_min = room_size_min + 2 * corridor_margin + 1 + slack;
            let config = DungeonConfig {
                width: width.max(panel_size_min),
                height: height.max(panel_size_min),
                panel_size_min,
                room_size_min,
                room_size_max,
                corridor_margin,
                wall_margin: 1,
            };
            check_seed(config, seed).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("valid configs should preserve structural invariants");
}
