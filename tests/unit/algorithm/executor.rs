//! Tests for model construction, ground seeding and the run loop

#[cfg(test)]
mod tests {
    use overtile::algorithm::executor::{OverlappingModel, RunOutcome, normalize_ground};
    use overtile::algorithm::wave::WaveState;
    use overtile::analysis::patterns::PatternVocabulary;
    use overtile::io::configuration::{ModelConfig, RunConfig};
    use overtile::spatial::bitmap::Bitmap;
    use overtile::WfcError;

    const SKY: [u8; 3] = [120, 180, 255];
    const EARTH: [u8; 3] = [90, 60, 30];

    fn checkerboard() -> Bitmap {
        Bitmap::from_fn(2, 2, |x, y| if (x + y) % 2 == 0 { [255; 3] } else { [0; 3] })
    }

    fn config(pattern_size: usize, width: usize, height: usize) -> ModelConfig {
        ModelConfig {
            pattern_size,
            output_width: width,
            output_height: height,
            symmetry: 1,
            ..ModelConfig::default()
        }
    }

    // Tests ground selectors normalize modulo the pattern count
    // Verified by using the remainder operator instead of rem_euclid
    #[test]
    fn test_normalize_ground() {
        assert_eq!(normalize_ground(0, 5), None);
        assert_eq!(normalize_ground(2, 5), Some(2));
        assert_eq!(normalize_ground(-1, 5), Some(4));
        assert_eq!(normalize_ground(5, 5), None);
        assert_eq!(normalize_ground(12, 5), Some(2));
        assert_eq!(normalize_ground(3, 0), None);
    }

    // Tests invalid configurations fail before any run
    // Verified by skipping validation in the constructor
    #[test]
    fn test_invalid_configuration_rejected() {
        let bad_symmetry = ModelConfig {
            symmetry: 0,
            ..config(2, 4, 4)
        };
        assert!(matches!(
            OverlappingModel::new(&checkerboard(), bad_symmetry),
            Err(WfcError::InvalidConfiguration { parameter: "symmetry", .. })
        ));

        let too_small = ModelConfig {
            periodic_output: false,
            ..config(3, 2, 8)
        };
        assert!(OverlappingModel::new(&checkerboard(), too_small).is_err());

        assert!(matches!(
            OverlappingModel::new(&Bitmap::new(0, 0), config(1, 4, 4)),
            Err(WfcError::InvalidExemplar { .. })
        ));
    }

    // Tests vocabularies must match the configured pattern size
    // Verified by removing the pattern size comparison
    #[test]
    fn test_from_vocabulary_pattern_size() {
        let vocabulary = PatternVocabulary::extract(&checkerboard(), 2, 1, true).unwrap();
        assert!(OverlappingModel::from_vocabulary(vocabulary.clone(), config(3, 4, 4)).is_err());

        let model = OverlappingModel::from_vocabulary(vocabulary, config(2, 4, 4)).unwrap();
        assert_eq!(model.vocabulary().len(), 2);
        assert_eq!(model.adjacency().pattern_count(), 2);
        assert_eq!(model.grid().len(), 16);
        assert_eq!(model.config().pattern_size, 2);
    }

    // Tests a prepared vocabulary is only checked against the output
    // Verified by skipping the output check in from_vocabulary
    #[test]
    fn test_from_vocabulary_checks_output_only() {
        let stripes = Bitmap::from_fn(3, 3, |x, _| if x == 0 { SKY } else { EARTH });
        let vocabulary = PatternVocabulary::extract(&stripes, 2, 1, false).unwrap();
        let bounded_input = ModelConfig {
            periodic_input: false,
            ..config(2, 4, 4)
        };
        assert!(OverlappingModel::from_vocabulary(vocabulary.clone(), bounded_input).is_ok());

        let bounded_output = ModelConfig {
            periodic_output: false,
            ..config(2, 1, 4)
        };
        assert!(matches!(
            OverlappingModel::from_vocabulary(vocabulary, bounded_output),
            Err(WfcError::InvalidConfiguration { parameter: "pattern_size", .. })
        ));
    }

    // Tests a periodic checkerboard always converges to a checkerboard
    // Verified by skipping propagation after observation
    #[test]
    fn test_checkerboard_converges() {
        let model = OverlappingModel::new(&checkerboard(), config(2, 4, 4)).unwrap();
        let report = model.generate(&RunConfig::seeded(9));

        assert!(report.success);
        assert_eq!(report.outcome, RunOutcome::Converged);
        assert_eq!(report.seed, 9);
        assert_eq!(report.iterations, 1);

        let first = report.bitmap.get(0, 0);
        for y in 0..4 {
            for x in 0..4 {
                let expected = if (x + y) % 2 == 0 { first } else { report.bitmap.get(1, 0) };
                assert_eq!(report.bitmap.get(x, y), expected);
            }
        }
        assert_ne!(report.bitmap.get(0, 0), report.bitmap.get(1, 0));
    }

    // Tests the self-contradicting 2x1 periodic output
    // Verified by reporting success whenever the iteration limit is hit
    #[test]
    fn test_contradiction_reported() {
        let model = OverlappingModel::new(&checkerboard(), config(2, 2, 1)).unwrap();
        let report = model.generate(&RunConfig::seeded(1).with_limit(1));

        assert!(!report.success);
        assert_eq!(report.outcome, RunOutcome::Contradiction);
        assert!(!report.outcome.is_success());
        assert_eq!(report.bitmap.width(), 2);
        assert_eq!(report.bitmap.height(), 1);
    }

    // Tests the iteration limit stops an undecided run
    // Verified by ignoring the limit
    #[test]
    fn test_iteration_limit() {
        let exemplar = Bitmap::from_pixels(2, 1, vec![SKY, EARTH]).unwrap();
        let model = OverlappingModel::new(&exemplar, config(1, 5, 5)).unwrap();
        let generation = model.run(&RunConfig::seeded(4).with_limit(3));

        assert_eq!(generation.outcome, RunOutcome::IterationLimit);
        assert!(generation.outcome.is_success());
        assert_eq!(generation.iterations, 3);
        assert_eq!(generation.wave.collapsed_count(), 3);

        let report = model.generate(&RunConfig::seeded(4).with_limit(3));
        assert!(!report.success);
    }

    // Tests ground seeding fixes the bottom row and bans ground elsewhere
    // Verified by banning ground from the bottom row instead
    #[test]
    fn test_ground_seeding() {
        let exemplar = Bitmap::from_pixels(1, 2, vec![SKY, EARTH]).unwrap();
        for ground in [1, -1, 3] {
            let model = OverlappingModel::new(
                &exemplar,
                ModelConfig {
                    ground,
                    ..config(1, 4, 3)
                },
            )
            .unwrap();
            assert_eq!(model.ground(), Some(1));

            let report = model.generate(&RunConfig::default());
            assert!(report.success);
            for x in 0..4 {
                assert_eq!(report.bitmap.get(x, 2), Some(EARTH));
                assert_eq!(report.bitmap.get(x, 0), Some(SKY));
                assert_eq!(report.bitmap.get(x, 1), Some(SKY));
            }
        }
    }

    // Tests a fresh wave carries ground bans already propagated
    // Verified by leaving ground bans on the stack
    #[test]
    fn test_new_wave_applies_ground() {
        let exemplar = Bitmap::from_pixels(1, 2, vec![SKY, EARTH]).unwrap();
        let model = OverlappingModel::new(
            &exemplar,
            ModelConfig {
                ground: 1,
                ..config(1, 2, 2)
            },
        )
        .unwrap();

        let wave = model.new_wave();
        assert_eq!(wave.pending(), 0);
        assert_eq!(wave.collapsed_count(), 4);
        assert!(wave.is_possible(model.grid().index(0, 1), 1));
        assert!(!wave.is_possible(model.grid().index(0, 0), 1));
    }

    // Tests a fresh seed is reported and replays the run
    // Verified by reporting a seed other than the one drawn
    #[test]
    fn test_fresh_seed_replay() {
        let exemplar = Bitmap::from_pixels(3, 1, vec![SKY, EARTH, SKY]).unwrap();
        let model = OverlappingModel::new(&exemplar, config(1, 6, 6)).unwrap();

        let first = model.generate(&RunConfig::default());
        let replay = model.generate(&RunConfig::seeded(first.seed));
        assert_eq!(first, replay);
    }

    // Tests observer cadence including iteration 0
    // Verified by notifying after each iteration instead of before
    #[test]
    fn test_observer_cadence() {
        let exemplar = Bitmap::from_pixels(2, 1, vec![SKY, EARTH]).unwrap();
        let model = OverlappingModel::new(&exemplar, config(1, 3, 3)).unwrap();

        let mut seen = Vec::new();
        let settings = RunConfig {
            trace_interval: 2,
            ..RunConfig::seeded(8)
        };
        let generation = model.run_with_observer(&settings, &mut |iteration: usize, _: &WaveState| {
            seen.push(iteration);
        });

        assert_eq!(generation.outcome, RunOutcome::Converged);
        assert_eq!(generation.iterations, 9);
        assert_eq!(seen, vec![0, 2, 4, 6, 8]);

        let mut calls = 0;
        let silent = RunConfig {
            trace_interval: 0,
            ..RunConfig::seeded(8)
        };
        model.run_with_observer(&silent, &mut |_: usize, _: &WaveState| calls += 1);
        assert_eq!(calls, 0);
    }

    // Tests a render of the final wave matches the report
    // Verified by rendering a fresh wave in generate
    #[test]
    fn test_render_matches_report() {
        let model = OverlappingModel::new(&checkerboard(), config(2, 6, 4)).unwrap();
        let settings = RunConfig::seeded(21);
        let generation = model.run(&settings);
        let report = model.generate(&settings);

        let rendering = model.render(&generation.wave);
        assert_eq!(rendering.bitmap, report.bitmap);
        assert_eq!(rendering.success, report.success);
    }
}
