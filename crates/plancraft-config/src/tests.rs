use super::*;

#[test]
fn default_config_has_no_phases() {
    let config = SolverConfig::default();
    assert!(config.phases.is_empty());
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert!(config.validate().is_err());
}

#[test]
fn parses_full_toml() {
    let config = SolverConfig::from_toml_str(
        r#"
        environment_mode = "full_assert"
        random_seed = 42

        [termination]
        seconds_spent_limit = 30
        step_count_limit = 1000
        unimproved_step_count_limit = 5

        [[phases]]
        type = "construction_heuristic"
        forager_type = "first_fit"
        sort_entities_by_difficulty = true

        [[phases]]
        type = "local_search"
        acceptor_type = "simulated_annealing"
        starting_temperature = 1.5
        accepted_count_limit = 4

        [bench]
        parallelism = 4
    "#,
    )
    .unwrap();

    config.validate().unwrap();
    assert!(config.environment_mode.is_full_assert());
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert_eq!(config.phases.len(), 2);
    assert!(matches!(
        config.phases[0],
        PhaseConfig::ConstructionHeuristic {
            forager_type: ForagerType::FirstFit,
            sort_entities_by_difficulty: true,
        }
    ));
}

#[test]
fn parses_yaml() {
    let config = SolverConfig::from_yaml_str(
        r#"
        random_seed: 7
        phases:
          - type: construction_heuristic
        "#,
    )
    .unwrap();

    config.validate().unwrap();
    assert_eq!(config.random_seed, Some(7));
    assert_eq!(config.phases.len(), 1);
}

#[test]
fn rejects_malformed_toml() {
    assert!(SolverConfig::from_toml_str("phases = 3").is_err());
    assert!(SolverConfig::from_toml_str("[[phases]]\ntype = \"warp_drive\"").is_err());
}

#[test]
fn rejects_negative_termination_limits() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        unimproved_step_count_limit = -1

        [[phases]]
        type = "construction_heuristic"
    "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("unimproved_step_count_limit"));
}

#[test]
fn rejects_empty_phase_list() {
    let config = SolverConfig::from_toml_str("random_seed = 1").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("at least one phase"));
}

#[test]
fn rejects_conflicting_acceptor_options() {
    // starting_temperature belongs to simulated annealing only.
    let config = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "local_search"
        acceptor_type = "hill_climbing"
        starting_temperature = 2.0
    "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("simulated_annealing"));
}

#[test]
fn rejects_non_positive_temperature_and_parallelism() {
    let config = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "local_search"
        acceptor_type = "simulated_annealing"
        starting_temperature = 0.0
    "#,
    )
    .unwrap();
    assert!(config.validate().is_err());

    let config = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "construction_heuristic"

        [bench]
        parallelism = 0
    "#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn missing_file_falls_back_to_default() {
    let config = SolverConfig::load("does-not-exist.toml").unwrap_or_default();
    assert!(config.phases.is_empty());
}
