use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [termination]
        seconds_spent_limit = 5
        step_count_limit = 1000
        unimproved_step_count_limit = 100

        [local_search]
        move_sample_size = 8
        swap_probability = 0.25

        [local_search.simulated_annealing]
        starting_temperature = 4.0
        decay_rate = 0.99

        [problem]
        min_days_between_cycle_shifts = 4

        [constraint_weights]
        coverage = { hard = 50 }
        stability = { soft = 0 }
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.termination.time_limit(), Some(Duration::from_secs(5)));
    assert_eq!(config.termination.step_count_limit, Some(1000));
    assert_eq!(config.termination.unimproved_step_count_limit, Some(100));
    assert_eq!(config.local_search.move_sample_size, 8);
    assert_eq!(config.local_search.simulated_annealing.starting_temperature, 4.0);
    assert_eq!(config.local_search.simulated_annealing.max_acceptance_probability, 0.5);
    assert_eq!(config.local_search.tabu.move_tabu_size, 10);
    assert_eq!(config.problem.cycle_shifts_per_day, 2);
    assert_eq!(config.problem.min_days_between_cycle_shifts, 4);
    assert_eq!(config.constraint_weights.coverage, HardSoftScore::of_hard(50));
    assert_eq!(config.constraint_weights.stability, HardSoftScore::ZERO);
    assert_eq!(config.constraint_weights.absence, HardSoftScore::of_hard(1000));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
random_seed: 3
termination:
  step_count_limit: 500
local_search:
  tabu:
    move_tabu_size: 4
constraint_weights:
  fairness:
    soft: 30
"#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(3));
    assert_eq!(config.termination.step_count_limit, Some(500));
    assert_eq!(config.local_search.tabu.move_tabu_size, 4);
    assert_eq!(config.constraint_weights.fairness, HardSoftScore::of_soft(30));
}

#[test]
fn test_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.random_seed, None);
    assert_eq!(config.problem.cycle_shifts_per_day, 2);
    assert!(config.termination.step_count_limit.is_some());
    assert!(config.validate().is_ok());

    let w = ConstraintWeights::default();
    assert!(w.coverage.has_hard_component());
    assert!(!w.fairness.has_hard_component());
    assert_eq!(w.entries().len(), 18);
}

#[test]
fn test_empty_toml_is_default() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
}

#[test]
fn test_invalid_values() {
    let negative = r#"
        [constraint_weights]
        fairness = { soft = -1 }
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(negative),
        Err(ConfigError::Invalid(_))
    ));

    let zero_sample = r#"
        [local_search]
        move_sample_size = 0
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(zero_sample),
        Err(ConfigError::Invalid(_))
    ));

    let bad_decay = r#"
        [local_search.simulated_annealing]
        decay_rate = 1.5
    "#;
    assert!(SolverConfig::from_toml_str(bad_decay).is_err());

    let unbounded = "termination:\n  seconds_spent_limit: ~\n  step_count_limit: ~\n";
    assert!(matches!(
        SolverConfig::from_yaml_str(unbounded),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        SolverConfig::from_toml_str("random_seed = \"x\""),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SolverConfig::load("/nonexistent/guardia.toml"),
        Err(ConfigError::Io(_))
    ));
    let err: GuardiaError = SolverConfig::load("/nonexistent/guardia.toml")
        .unwrap_err()
        .into();
    assert!(matches!(err, GuardiaError::Config(_)));
}

#[test]
fn test_termination_helpers() {
    let t = TerminationConfig::steps(100).with_unimproved_step_count_limit(10);
    assert_eq!(t.step_count_limit, Some(100));
    assert_eq!(t.unimproved_step_count_limit, Some(10));
    assert_eq!(t.time_limit(), None);

    let t = t.with_time_limit(Duration::from_millis(1500));
    assert_eq!(t.time_limit(), Some(Duration::from_millis(1500)));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(9)
        .with_termination(TerminationConfig::steps(10));
    assert_eq!(config.random_seed, Some(9));
    assert_eq!(config.termination.step_count_limit, Some(10));
}

#[test]
fn test_oversized_time_limit() {
    let mut t = TerminationConfig::steps(10);
    t.seconds_spent_limit = Some(u64::MAX / 10);
    assert_eq!(t.time_limit(), Some(Duration::from_millis(u64::MAX)));
    assert!(matches!(t.validate(), Err(ConfigError::Invalid(_))));

    let config = SolverConfig::new().with_termination(t);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let yaml = "termination:\n  seconds_spent_limit: 18446744073709552\n  step_count_limit: ~\n";
    assert!(matches!(
        SolverConfig::from_yaml_str(yaml),
        Err(ConfigError::Invalid(_))
    ));
}
