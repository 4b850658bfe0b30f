use aco_tsp_solver::error::SolverError;
use aco_tsp_solver::heuristics::aco::{ACOConfig, AntSystem, SolverState};
use aco_tsp_solver::instance::TspInstance;
use aco_tsp_solver::solution::is_valid_tour;
use std::io::Cursor;

fn square() -> TspInstance {
    TspInstance::from_reader(Cursor::new("0 0\n0 10\n10 10\n10 0\n")).unwrap()
}

#[test]
fn it_converges_on_the_square() {
    let config = ACOConfig {
        alpha: 1.0,
        beta: 5.0,
        evaporation_rate: 0.5,
        max_iterations: 20,
        ..Default::default()
    };
    let mut aco = AntSystem::new(square(), config).unwrap();

    assert_eq!(aco.nearest_neighbor_length(), 40.0);

    let solution = aco.run().unwrap();
    assert_eq!(solution.length, 40.0);
    assert_eq!(solution.nearest_neighbor_length, 40.0);
    assert!(is_valid_tour(&solution.tour, 4));
}

#[test]
fn it_ignores_empty_input() {
    let instance = TspInstance::from_reader(Cursor::new("")).unwrap();
    let mut aco = AntSystem::new(instance, ACOConfig::default()).unwrap();

    assert_eq!(aco.state(), SolverState::Done);
    assert!(aco.run().is_none());
}

#[test]
fn it_solves_a_single_city() {
    let instance = TspInstance::from_reader(Cursor::new("7 -3\n")).unwrap();
    let config = ACOConfig { max_iterations: 5, ..Default::default() };
    let mut aco = AntSystem::new(instance, config).unwrap();

    let solution = aco.run().unwrap();
    assert_eq!(solution.length, 0.0);
    assert_eq!(solution.tour, vec![0, 0]);
    assert_eq!(solution.nearest_neighbor_length, 0.0);
    assert!(aco.pheromone().is_strictly_positive());
}

#[test]
fn it_rejects_malformed_lines() {
    assert!(matches!(
        TspInstance::from_reader(Cursor::new("0 0\n1 2 3\n")),
        Err(SolverError::Format { line: 2, .. })
    ));
    assert!(matches!(
        TspInstance::from_reader(Cursor::new("0 0\n1 x\n")),
        Err(SolverError::Format { line: 2, .. })
    ));
}

#[test]
fn it_reads_coordinate_files() {
    let path = std::env::temp_dir().join(format!("aco_cities_{}.txt", std::process::id()));
    std::fs::write(&path, "0 0\n0 10\n10 10\n10 0\n\nignored line with words\n").unwrap();
    let instance = TspInstance::from_file(&path);
    std::fs::remove_file(&path).ok();

    let instance = instance.unwrap();
    assert_eq!(instance.dimension(), 4);
    assert!(instance.name.starts_with("aco_cities_"));
}

#[test]
fn it_reports_missing_files() {
    assert!(matches!(
        TspInstance::from_file("/definitely/not/here.txt"),
        Err(SolverError::Io(_))
    ));
}

#[test]
fn it_keeps_invariants_on_a_larger_instance() {
    let coords: Vec<(i64, i64)> = (0..25)
        .map(|i| ((i * 37 % 101) as i64, (i * 53 % 97) as i64))
        .collect();
    let instance = TspInstance::from_coordinates("ring", &coords);
    let config = ACOConfig {
        max_iterations: 15,
        seed: 9,
        neighbor_list_len: Some(5),
        ..Default::default()
    };
    let mut aco = AntSystem::new(instance, config).unwrap();

    let mut previous = f64::INFINITY;
    while aco.state() != SolverState::Done {
        aco.iterate();
        assert!(aco.best().length <= previous);
        previous = aco.best().length;

        assert!(aco.pheromone().is_symmetric());
        assert!(aco.pheromone().is_strictly_positive());
        for ant in aco.ants() {
            assert!(is_valid_tour(&ant.tour, 25));
            assert_eq!(ant.tour_length, aco.distances().tour_length(&ant.tour));
        }
    }
}

#[test]
fn it_is_reproducible_for_a_fixed_seed() {
    let coords: Vec<(i64, i64)> = (0..12).map(|i| ((i * 17 % 29) as i64, (i * 11 % 23) as i64)).collect();
    let config = ACOConfig { max_iterations: 10, seed: 123, ..Default::default() };

    let a = AntSystem::new(TspInstance::from_coordinates("a", &coords), config.clone()).unwrap().run().unwrap();
    let b = AntSystem::new(TspInstance::from_coordinates("b", &coords), config).unwrap().run().unwrap();

    assert_eq!(a.tour, b.tour);
    assert_eq!(a.history, b.history);
}

#[test]
fn it_keeps_trails_positive_over_long_runs() {
    let config = ACOConfig { max_iterations: 1200, ..Default::default() };
    let mut aco = AntSystem::new(square(), config).unwrap();

    while aco.state() != SolverState::Done {
        aco.iterate();
        assert!(aco.pheromone().is_strictly_positive());
        assert!(aco.pheromone().is_symmetric());
    }
    assert!(aco.pheromone().is_strictly_positive());
    assert_eq!(aco.iteration(), 1200);
    assert_eq!(aco.best().length, 40.0);
}

#[test]
fn it_handles_extreme_coordinates() {
    let input = "-9223372036854775808 0\n9223372036854775807 0\n";
    let instance = TspInstance::from_reader(Cursor::new(input)).unwrap();
    let config = ACOConfig { max_iterations: 3, ..Default::default() };
    let mut aco = AntSystem::new(instance, config).unwrap();

    assert!(aco.nearest_neighbor_length().is_finite());
    assert!(aco.tau0() > 0.0);
    let solution = aco.run().unwrap();
    assert!(is_valid_tour(&solution.tour, 2));
    assert!(solution.length.is_finite());
}

#[test]
fn it_rejects_lines_that_are_not_utf8() {
    let input: &[u8] = b"0 0\n\xfe\xff 1\n";
    assert!(matches!(
        TspInstance::from_reader(Cursor::new(input)),
        Err(SolverError::Format { line: 2, .. })
    ));
}
