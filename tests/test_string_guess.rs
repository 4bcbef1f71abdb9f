use strevolve::{
    error::GeneticError,
    evolution::{EvolutionLauncher, EvolutionOptions, GaParams, LogLevel, TargetChallenge},
    strategy::{BreedStrategy, ParallelStrategy, SequentialStrategy},
};

fn ab_options(num_threads: usize) -> EvolutionOptions {
    let params = GaParams::builder()
        .generation_size(50)
        .elite_count(2)
        .crossover_count(20)
        .mutated_count(20)
        .mutation_rate(0.1)
        .build();

    EvolutionOptions::builder()
        .num_generations(500)
        .log_level(LogLevel::Minimal)
        .report_interval(100)
        .num_threads(num_threads)
        .seed(42)
        .params(params)
        .build()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_ab_converges() {
    init_logging();

    let mut launcher = EvolutionLauncher::new(
        SequentialStrategy::new(),
        TargetChallenge::new("AB"),
        ab_options(2),
    )
    .unwrap();
    assert_eq!(launcher.params().individual_max_size(), Some(4));

    let result = launcher.evolve().unwrap();

    assert_eq!(result.generations, 500);
    assert!(!result.cancelled);
    assert!(
        result.history.windows(2).all(|w| w[1] <= w[0]),
        "best fitness regressed: {:?}",
        result.history
    );
    assert!(result.score < 50.0, "best score {} after 500 generations", result.score);
    assert_eq!(result.best.data(), b"AB");
}

#[test]
fn test_ab_converges_with_parallel_breeding() {
    let mut launcher = EvolutionLauncher::new(
        ParallelStrategy::with_chunk_size(8).unwrap(),
        TargetChallenge::new("AB"),
        ab_options(4),
    )
    .unwrap();

    let result = launcher.evolve().unwrap();

    assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    assert!(result.score < 50.0, "best score {} after 500 generations", result.score);
}

fn generation_sequence<S: BreedStrategy>(
    strategy: S,
    num_threads: usize,
    steps: usize,
) -> Vec<Vec<Vec<u8>>> {
    let mut options = ab_options(num_threads);
    options.set_log_level(LogLevel::None);
    let mut launcher =
        EvolutionLauncher::new(strategy, TargetChallenge::new("Deterministic"), options).unwrap();

    let mut sequence = Vec::with_capacity(steps);
    for _ in 0..steps {
        launcher.step().unwrap();
        sequence.push(
            launcher
                .population()
                .iter()
                .map(|i| i.data().to_vec())
                .collect(),
        );
    }
    sequence
}

#[test]
fn test_identical_seeds_give_identical_generations() {
    let first = generation_sequence(SequentialStrategy::new(), 1, 60);
    let second = generation_sequence(SequentialStrategy::new(), 1, 60);
    assert_eq!(first, second);
}

#[test]
fn test_ranking_worker_count_does_not_change_generations() {
    let single = generation_sequence(SequentialStrategy::new(), 1, 30);
    let many = generation_sequence(SequentialStrategy::new(), 4, 30);
    assert_eq!(single, many);
}

#[test]
fn test_parallel_breeding_is_reproducible_across_thread_counts() {
    let single = generation_sequence(ParallelStrategy::with_chunk_size(5).unwrap(), 1, 30);
    let many = generation_sequence(ParallelStrategy::with_chunk_size(5).unwrap(), 4, 30);
    assert_eq!(single, many);
}

#[test]
fn test_different_seeds_diverge() {
    let mut options = ab_options(1);
    options.set_log_level(LogLevel::None);
    let a = EvolutionLauncher::new(
        SequentialStrategy::new(),
        TargetChallenge::new("xyz"),
        options.clone(),
    )
    .unwrap();
    options.set_seed(43);
    let b = EvolutionLauncher::new(SequentialStrategy::new(), TargetChallenge::new("xyz"), options)
        .unwrap();
    assert_ne!(a.population(), b.population());
}

#[test]
fn test_elitism_keeps_best_monotonic_on_longer_target() {
    let params = GaParams::builder()
        .generation_size(80)
        .elite_count(1)
        .crossover_count(30)
        .mutated_count(30)
        .build();
    let options = EvolutionOptions::builder()
        .num_generations(150)
        .num_threads(3)
        .params(params)
        .build();
    let mut launcher = EvolutionLauncher::new(
        ParallelStrategy::new(),
        TargetChallenge::new("Hello, world!"),
        options,
    )
    .unwrap();

    let result = launcher.evolve().unwrap();
    assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    assert!(result.score < result.history[0]);
}

#[test]
fn test_invalid_options_rejected_at_construction() {
    let params = GaParams::builder()
        .generation_size(10)
        .elite_count(4)
        .crossover_count(4)
        .mutated_count(4)
        .build();
    let options = EvolutionOptions::builder().params(params).build();

    let result =
        EvolutionLauncher::new(SequentialStrategy::new(), TargetChallenge::new("AB"), options);
    match result {
        Err(GeneticError::Configuration(msg)) => {
            assert!(msg.contains("exceeds generation size"));
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_stop_signal_from_another_thread() {
    let mut options = ab_options(2);
    options.set_num_generations(1_000_000);
    options.set_log_level(LogLevel::None);
    let mut launcher = EvolutionLauncher::new(
        SequentialStrategy::new(),
        TargetChallenge::new("a long target string"),
        options,
    )
    .unwrap();

    let stop = launcher.stop_signal();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(50));
        stop.stop();
    });

    let result = launcher.evolve().unwrap();
    handle.join().unwrap();

    assert!(result.cancelled);
    assert!(result.generations < 1_000_000);
    assert_eq!(result.history.len(), result.generations);
}
