//! No space left on device: directory sizes from a terminal transcript

use crate::utils::{at_line, invalid_format};
use anyhow::{Context, anyhow, bail};
use puzzle_solver::visual::{EntryKind, TreeLine};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 7, tags = ["tree"])]
pub struct Solver;

const SMALL_DIRECTORY_LIMIT: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const REQUIRED_FREE: u64 = 30_000_000;

pub const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File<'a> {
    pub name: &'a str,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory<'a> {
    pub name: &'a str,
    /// Only used to walk upwards; `None` for the root
    pub parent: Option<usize>,
    /// Child directories in the order they were first seen
    pub children: Vec<usize>,
    pub files: Vec<File<'a>>,
    /// Own files plus everything below
    pub size: u64,
}

impl<'a> Directory<'a> {
    fn new(name: &'a str, parent: Option<usize>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            files: Vec::new(),
            size: 0,
        }
    }
}

/// Directory arena; index [`ROOT`] is `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystem<'a> {
    dirs: Vec<Directory<'a>>,
}

impl<'a> FileSystem<'a> {
    pub fn new() -> Self {
        Self {
            dirs: vec![Directory::new("/", None)],
        }
    }

    pub fn root(&self) -> &Directory<'a> {
        &self.dirs[ROOT]
    }

    pub fn directories(&self) -> &[Directory<'a>] {
        &self.dirs
    }

    pub fn child(&self, dir: usize, name: &str) -> Option<usize> {
        self.dirs[dir]
            .children
            .iter()
            .copied()
            .find(|&c| self.dirs[c].name == name)
    }

    /// Index of the child directory `name`, created if not seen before
    pub fn child_or_insert(&mut self, dir: usize, name: &'a str) -> usize {
        if let Some(existing) = self.child(dir, name) {
            return existing;
        }
        let index = self.dirs.len();
        self.dirs.push(Directory::new(name, Some(dir)));
        self.dirs[dir].children.push(index);
        index
    }

    /// Record a file and add its size to every ancestor
    ///
    /// Listing the same file twice is fine as long as the size agrees.
    pub fn add_file(&mut self, dir: usize, name: &'a str, size: u64) -> anyhow::Result<()> {
        if let Some(existing) = self.dirs[dir].files.iter().find(|f| f.name == name) {
            if existing.size != size {
                bail!(
                    "file {name} listed with size {size}, previously {}",
                    existing.size
                );
            }
            return Ok(());
        }

        // Every ancestor is at most the root, so checking the root covers them all
        if self.root().size.checked_add(size).is_none() {
            bail!("file {name} of size {size} overflows the total size");
        }

        self.dirs[dir].files.push(File { name, size });
        let mut current = Some(dir);
        while let Some(index) = current {
            self.dirs[index].size += size;
            current = self.dirs[index].parent;
        }
        Ok(())
    }

    /// Absolute path of `dir`, `/` for the root and `/a/e` below it
    pub fn path(&self, dir: usize) -> String {
        let mut names = Vec::new();
        let mut current = dir;
        while let Some(parent) = self.dirs[current].parent {
            names.push(self.dirs[current].name);
            current = parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Absolute path of every file
    pub fn file_paths(&self) -> Vec<String> {
        self.dirs
            .iter()
            .enumerate()
            .flat_map(|(index, dir)| {
                let base = self.path(index);
                dir.files.iter().map(move |f| {
                    if base == "/" {
                        format!("/{}", f.name)
                    } else {
                        format!("{base}/{}", f.name)
                    }
                })
            })
            .collect()
    }

    /// Entries in depth-first order, each directory's files before its subdirectories
    pub fn listing(&self) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        let mut stack = vec![(ROOT, 0)];
        while let Some((index, depth)) = stack.pop() {
            let dir = &self.dirs[index];
            lines.push(TreeLine {
                depth,
                name: dir.name.to_string(),
                kind: EntryKind::Directory,
                size: dir.size,
            });
            lines.extend(dir.files.iter().map(|f| TreeLine {
                depth: depth + 1,
                name: f.name.to_string(),
                kind: EntryKind::File,
                size: f.size,
            }));
            stack.extend(dir.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        lines
    }
}

impl Default for FileSystem<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = FileSystem<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut fs = FileSystem::new();
        let mut cwd = ROOT;
        for (idx, line) in input.trim().lines().enumerate() {
            apply_line(&mut fs, &mut cwd, line.trim()).map_err(|e| invalid_format(at_line(idx, e)))?;
        }
        tracing::debug!(directories = fs.dirs.len(), used = fs.root().size, "built tree");
        Ok(fs)
    }
}

fn apply_line<'a>(fs: &mut FileSystem<'a>, cwd: &mut usize, line: &'a str) -> anyhow::Result<()> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next(), words.next()) {
        (Some("$"), Some("cd"), Some("/"), None) => *cwd = ROOT,
        (Some("$"), Some("cd"), Some(".."), None) => {
            *cwd = fs.dirs[*cwd].parent.unwrap_or(ROOT);
        }
        (Some("$"), Some("cd"), Some(name), None) => *cwd = fs.child_or_insert(*cwd, name),
        (Some("$"), Some("ls"), None, None) => {}
        (Some("$"), Some(command), ..) => bail!("unknown command {command:?}"),
        (Some("dir"), Some(name), None, None) => {
            fs.child_or_insert(*cwd, name);
        }
        (Some(size), Some(name), None, None) => {
            let size = size
                .parse::<u64>()
                .with_context(|| format!("expected a file size, got {size:?}"))?;
            fs.add_file(*cwd, name, size)?;
        }
        _ => return Err(anyhow!("unexpected line {line:?}")),
    }
    Ok(())
}

/// `None` if the total does not fit in a `u64`
pub fn sum_of_small_directories(fs: &FileSystem<'_>, limit: u64) -> Option<u64> {
    fs.directories()
        .iter()
        .map(|d| d.size)
        .filter(|&size| size <= limit)
        .try_fold(0u64, |acc, size| acc.checked_add(size))
}

/// Size of the smallest directory whose removal frees enough space
pub fn smallest_deletion(fs: &FileSystem<'_>, disk: u64, required: u64) -> Option<u64> {
    let target = required.checked_add(fs.root().size)?.saturating_sub(disk);
    fs.directories()
        .iter()
        .map(|d| d.size)
        .filter(|&size| size >= target)
        .min()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        sum_of_small_directories(shared, SMALL_DIRECTORY_LIMIT)
            .map(Answer::from)
            .ok_or_else(|| SolveError::failed("sum of small directory sizes overflows"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        smallest_deletion(shared, DISK_SIZE, REQUIRED_FREE)
            .map(Answer::from)
            .ok_or_else(|| SolveError::NoSolution("no directory frees enough space".to_string()))
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        Ok(vec![Visualization::Tree(shared.listing())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use puzzle_solver::Solver as _;
    use std::collections::{BTreeMap, BTreeSet};

    const SAMPLE: &str = "\
$ cd /
$ ls
dir a
14848514 b.txt
8504156 c.dat
dir d
$ cd a
$ ls
dir e
29116 f
2557 g
62596 h.lst
$ cd e
$ ls
584 i
$ cd ..
$ cd ..
$ cd d
$ ls
4060174 j
8033020 d.log
5626152 d.ext
7214296 k
";

    #[test]
    fn test_sample() {
        let fs = Solver::parse(SAMPLE).unwrap();
        assert_eq!(fs.root().size, 48381165);
        assert_eq!(Solver::solve_part(&fs, 1).unwrap(), 95437);
        assert_eq!(Solver::solve_part(&fs, 2).unwrap(), 24933642);
    }

    #[test]
    fn test_directory_sizes() {
        let fs = Solver::parse(SAMPLE).unwrap();
        let sizes: BTreeMap<String, u64> = (0..fs.directories().len())
            .map(|i| (fs.path(i), fs.directories()[i].size))
            .collect();
        assert_eq!(sizes["/a/e"], 584);
        assert_eq!(sizes["/a"], 94853);
        assert_eq!(sizes["/d"], 24933642);
    }

    #[test]
    fn test_cd_up_from_root_stays_at_root() {
        let fs = Solver::parse("$ cd ..\n$ cd ..\n5 x\n").unwrap();
        assert_eq!(fs.root().files, vec![File { name: "x", size: 5 }]);
    }

    #[test]
    fn test_cd_into_unlisted_directory_creates_it() {
        let fs = Solver::parse("$ cd q\n$ ls\n10 z").unwrap();
        assert_eq!(fs.file_paths(), vec!["/q/z".to_string()]);
        assert_eq!(fs.root().size, 10);
    }

    #[test]
    fn test_relisting_does_not_double_count() {
        let fs = Solver::parse("$ ls\n10 a\n$ ls\n10 a").unwrap();
        assert_eq!(fs.root().size, 10);

        let err = Solver::parse("$ ls\n10 a\n$ ls\n11 a").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(line 4) file a listed with size 11, previously 10".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = Solver::parse("$ cd /\n$ rm -rf").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(line 2) unknown command \"rm\"".to_string())
        );
    }

    #[test]
    fn test_root_can_be_the_deletion_candidate() {
        let fs = Solver::parse("$ ls\n60000000 big\ndir a\n$ cd a\n1 small").unwrap();
        assert_eq!(smallest_deletion(&fs, DISK_SIZE, REQUIRED_FREE), Some(60000001));
    }

    #[test]
    fn test_overflowing_file_size_reports_line() {
        let err = Solver::parse("$ ls\n18446744073709551615 a\n1 b\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat(
                "(line 3) file b of size 1 overflows the total size".to_string()
            )
        );
    }

    #[test]
    fn test_huge_directories_do_not_overflow_solvers() {
        let fs = Solver::parse("$ ls\n18446744073709551615 a\n").unwrap();
        assert_eq!(sum_of_small_directories(&fs, u64::MAX), Some(u64::MAX));
        assert_eq!(smallest_deletion(&fs, DISK_SIZE, REQUIRED_FREE), None);
        assert!(Solver::solve_part(&fs, 2).is_err());

        let fs = Solver::parse("$ ls\ndir a\n$ cd a\n9223372036854775808 x\n").unwrap();
        assert_eq!(sum_of_small_directories(&fs, u64::MAX), None);
    }

    #[test]
    fn test_listing_is_depth_first() {
        let fs = Solver::parse(SAMPLE).unwrap();
        let listing = fs.listing();
        let names: Vec<(usize, &str)> = listing.iter().map(|l| (l.depth, l.name.as_str())).collect();
        assert_eq!(
            names[..8],
            [
                (0, "/"),
                (1, "b.txt"),
                (1, "c.dat"),
                (1, "a"),
                (2, "f"),
                (2, "g"),
                (2, "h.lst"),
                (2, "e"),
            ]
        );
        assert_eq!(listing.len(), 14);
        assert_eq!(listing[3].kind, EntryKind::Directory);
        assert_eq!(listing[3].size, 94853);
    }

    /// Files as (directory path segments, name, size)
    fn files_strategy() -> impl Strategy<Value = Vec<(Vec<String>, String, u64)>> {
        let segment = prop::sample::select(vec!["a", "b", "c"]).prop_map(str::to_string);
        prop::collection::vec(
            (
                prop::collection::vec(segment, 0..4),
                "[a-z]{1,4}\\.txt",
                1u64..200_000,
            ),
            1..20,
        )
        .prop_map(|files| {
            // Keep one size per path
            let mut seen = BTreeSet::new();
            files
                .into_iter()
                .filter(|(dir, name, _)| seen.insert((dir.clone(), name.clone())))
                .collect()
        })
    }

    fn transcript(files: &[(Vec<String>, String, u64)]) -> String {
        let mut out = String::new();
        for (dir, name, size) in files {
            out.push_str("$ cd /\n");
            for segment in dir {
                out.push_str(&format!("$ cd {segment}\n"));
            }
            out.push_str(&format!("$ ls\n{size} {name}\n"));
        }
        out
    }

    proptest! {
        #[test]
        fn prop_root_size_is_total(files in files_strategy()) {
            let input = transcript(&files);
            let fs = Solver::parse(&input).unwrap();
            prop_assert_eq!(fs.root().size, files.iter().map(|(_, _, s)| s).sum::<u64>());
        }

        #[test]
        fn prop_file_paths_round_trip(files in files_strategy()) {
            let input = transcript(&files);
            let fs = Solver::parse(&input).unwrap();
            let expected: BTreeSet<String> = files
                .iter()
                .map(|(dir, name, _)| {
                    dir.iter().map(|s| format!("/{s}")).collect::<String>() + "/" + name
                })
                .collect();
            let actual: BTreeSet<String> = fs.file_paths().into_iter().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_small_sum_grows_with_limit(files in files_strategy(), a in 0u64..500_000, b in 0u64..500_000) {
            let input = transcript(&files);
            let fs = Solver::parse(&input).unwrap();
            let (lo, hi) = (a.min(b), a.max(b));
            prop_assert!(sum_of_small_directories(&fs, lo).unwrap() <= sum_of_small_directories(&fs, hi).unwrap());
        }
    }
}
