// tests/property_tests.rs

use proptest::prelude::*;
use qkdsim::{Scenario, SimulationParams, Simulator};

proptest! {
    #[test]
    fn prop_ideal_keys_always_agree(seed in any::<u64>(), qubits in 10usize..=300) {
        let run = Simulator::new()
            .with_seed(seed)
            .execute(Scenario::Ideal, &SimulationParams::new(qubits, 0.0, 0.0))
            .unwrap();
        prop_assert_eq!(run.qber, 0.0);
        prop_assert_eq!(&run.sifted.alice, &run.sifted.bob);
        prop_assert_eq!(run.sifted.len(), run.matching_count());
    }

    #[test]
    fn prop_sifting_efficiency_near_half(seed in any::<u64>()) {
        let result = Simulator::new()
            .with_seed(seed)
            .run(Scenario::ErrorOnly, &SimulationParams::new(1000, 0.05, 0.0))
            .unwrap();
        let efficiency = result.sifted_key_length as f64 / result.qubit_count as f64;
        prop_assert!((0.4..=0.6).contains(&efficiency), "efficiency {}", efficiency);
    }

    #[test]
    fn prop_seeded_runs_are_reproducible(seed in any::<u64>(), eve in 0.0f64..=1.0, noise in 0.0f64..=0.5) {
        let simulator = Simulator::new().with_seed(seed);
        let params = SimulationParams::new(64, noise, eve);
        let a = simulator.execute(Scenario::ErrorWithEve, &params).unwrap();
        let b = simulator.execute(Scenario::ErrorWithEve, &params).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_qber_is_a_fraction(seed in any::<u64>(), eve in 0.0f64..=1.0, noise in 0.0f64..=0.5) {
        let result = Simulator::new()
            .with_seed(seed)
            .run(Scenario::ErrorWithEve, &SimulationParams::new(50, noise, eve))
            .unwrap();
        prop_assert!((0.0..=1.0).contains(&result.qber));
        prop_assert!(result.sifted_key_length <= result.qubit_count);
    }
}
