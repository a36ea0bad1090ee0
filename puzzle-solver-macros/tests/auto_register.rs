use puzzle_solver::{
    Answer, AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegistryBuilder,
    SolveError,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 24, tags = ["test", "combined"])]
struct Registered;

impl AocParser for Registered {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .map(|n| {
                n.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad number '{n}'")))
            })
            .collect()
    }
}

impl PartSolver<1> for Registered {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared.iter().sum::<u32>().into())
    }
}

impl PartSolver<2> for Registered {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        shared
            .iter()
            .max()
            .map(|&m| m.into())
            .ok_or_else(|| SolveError::NoSolution("empty list".into()))
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 25)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(_shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok("done".into())
    }
}

#[test]
fn test_plugin_is_registered_with_tags() {
    let registry = RegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    let info = registry.get_info(2030, 24).expect("plugin missing");
    assert_eq!(info.parts, 2);
    assert_eq!(info.tags, &["test", "combined"]);

    let solver = registry
        .create_solver(2030, 24, "5, 6, 7")
        .expect("Failed to create solver");
    assert_eq!(solver.solve(1).unwrap().answer, Answer::Number(18));
    assert_eq!(solver.solve(2).unwrap().answer, Answer::Number(7));
}

#[test]
fn test_tag_filter_skips_untagged_plugins() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"combined"))
        .expect("Failed to register plugins")
        .build();

    assert!(registry.contains(2030, 24));
    assert!(!registry.contains(2030, 25));
}

#[test]
fn test_untagged_plugin_registers_with_empty_tags() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2030 && plugin.day == 25)
        .unwrap()
        .build();

    let info = registry.get_info(2030, 25).unwrap();
    assert!(info.tags.is_empty());
    assert_eq!(registry.create_solver(2030, 25, "").unwrap().solve(1).unwrap().answer, "done");
}
