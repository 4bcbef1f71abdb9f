use strevolve::{
    alphabet::Alphabet,
    evolution::{Challenge, GaParams, RankingStage, StopSignal, TargetChallenge},
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
    strategy::{
        operators::{crossover, mutate, random_individual, random_population},
        BreedStrategy, SequentialStrategy,
    },
};

fn random_ranked(rng: &mut RandomNumberGenerator, params: &GaParams) -> Individual {
    let individual = random_individual(params, rng);
    let fitness = rng.gen_probability() * 100_000.0;
    Individual::with_fitness(individual.into_data(), fitness)
}

#[test]
fn test_ranking_orders_random_populations() {
    let stage = RankingStage::new(4).unwrap();
    let challenge = TargetChallenge::new("The quick brown fox");
    let params = GaParams::builder().generation_size(257).build();
    let mut rng = RandomNumberGenerator::from_seed(1);

    for _ in 0..10 {
        let mut population = random_population(&params, &mut rng);
        stage.rank(&mut population, &challenge, &StopSignal::new()).unwrap();

        let scores: Vec<f64> = population.iter().map(|i| i.fitness().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        assert!(scores.iter().all(|&s| s >= 0.0));
    }
}

#[test]
fn test_evaluator_is_zero_only_at_target() {
    let target = "struct GAParams {\n    int generationSize = 500;\n};\n";
    let challenge = TargetChallenge::new(target);
    assert_eq!(challenge.score(target.as_bytes()), 0.0);

    let params = GaParams::default();
    let mut rng = RandomNumberGenerator::from_seed(5);
    for _ in 0..500 {
        let candidate = random_individual(&params, &mut rng);
        let score = challenge.score(candidate.data());
        assert!(score >= 0.0);
        assert!(score > 0.0 || candidate.data() == target.as_bytes());
    }
}

#[test]
fn test_crossover_properties() {
    let params = GaParams::default();
    let mut rng = RandomNumberGenerator::from_seed(17);

    for _ in 0..2000 {
        let a = random_ranked(&mut rng, &params);
        let b = random_ranked(&mut rng, &params);
        let child = crossover(&a, &b, &mut rng).unwrap();

        assert_eq!(child.len(), (a.len() + b.len()) / 2);
        let shared = a.len().min(b.len());
        for p in 0..shared {
            let byte = child.data()[p];
            assert!(byte == a.data()[p] || byte == b.data()[p]);
        }
        let longer = if a.len() > b.len() { &a } else { &b };
        assert_eq!(&child.data()[shared..], &longer.data()[shared..child.len()]);
    }
}

#[test]
fn test_mutation_length_stays_in_bounds() {
    let params = GaParams::builder().individual_max_size(9).build();
    let mut rng = RandomNumberGenerator::from_seed(23);

    for _ in 0..2000 {
        let source = random_individual(&params, &mut rng);
        let child = mutate(&source, &params, &mut rng).unwrap();
        assert!((1..=9).contains(&child.len()));
        assert!(child
            .data()
            .iter()
            .skip(source.len().saturating_sub(1))
            .all(|&b| params.alphabet().contains(b)));
    }
}

#[test]
fn test_mutation_rate_statistics() {
    let rate = 0.2;
    let alphabet = Alphabet::default();
    let params = GaParams::builder()
        .individual_max_size(100)
        .mutation_rate(rate)
        .alphabet(alphabet.clone())
        .build();
    let mut rng = RandomNumberGenerator::from_seed(31);

    let mut positions = 0usize;
    let mut changed = 0usize;
    for _ in 0..3000 {
        let source = Individual::new((0..100).map(|_| alphabet.sample(&mut rng)).collect());
        let child = mutate(&source, &params, &mut rng).unwrap();

        // Positions before the refilled tail are only touched by the per-symbol draw.
        let untouched = child.len().min(source.len() - 1);
        positions += untouched;
        changed += (0..untouched)
            .filter(|&p| child.data()[p] != source.data()[p])
            .count();
    }

    // A rewrite can land on the same symbol, which happens 1 time in |alphabet|.
    let expected = rate * (1.0 - 1.0 / alphabet.len() as f64);
    let observed = changed as f64 / positions as f64;
    assert!(
        (observed - expected).abs() < 0.01,
        "observed {} expected {}",
        observed,
        expected
    );
}

#[test]
fn test_random_fill_respects_bounds_and_alphabet() {
    let alphabet = Alphabet::new(b"ACGT".to_vec()).unwrap();
    let params = GaParams::builder()
        .generation_size(40)
        .elite_count(0)
        .crossover_count(0)
        .mutated_count(0)
        .individual_max_size(4)
        .alphabet(alphabet.clone())
        .build();
    let mut rng = RandomNumberGenerator::from_seed(2);

    let ranked: Population = (0..40)
        .map(|_| random_ranked(&mut rng, &params))
        .collect();
    for _ in 0..25 {
        let next = SequentialStrategy::new().breed(&ranked, &params, &mut rng).unwrap();
        assert_eq!(next.len(), 40);
        for individual in &next {
            assert!((1..=30).contains(&individual.len()));
            assert!(individual.data().iter().all(|&b| alphabet.contains(b)));
        }
    }
}
