//! Interactive front end: index a text file, then inspect and query its word graph.

use {
    env_logger::Env,
    infix_dawg::{
        io::save_edges, BoxResult, DawgError, DawgIndex, FileTextSource, IndexConfig, TextSource,
        DEFAULT_MEMORY_GUARD_THRESHOLD, LARGE_INPUT_LINES,
    },
    log::error,
    std::io::{stdout, Result as IoResult, Write},
    tokio::io::{stdin, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
};

const BANNER: &str = "///// DAWG text index /////\n\
    ///// Blumer, A. et al. (1985). The smallest automaton recognizing the subwords of a text. \
    Theoretical Computer Science, 40, 31-55. DOI: 10.1016/0304-3975(85)90157-4 /////\n";

const MENU: &str = "You now have the following options:\n\
    (0) Exit the program.\n\
    (1) Print all of the DAWG's primary and secondary edges.\n\
    (2) Save all of the DAWG's primary and secondary edges to a file.\n\
    (3) Print the number of the DAWG's states.\n\
    (4) Search for a specific string within the DAWG.";

const SEPARATOR: &str = "==============";

/// Line-oriented prompts on standard input and output.
struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// Prints `prompt` and reads one line of input. Returns `None` at end of input.
    async fn ask(&mut self, prompt: &str) -> IoResult<Option<String>> {
        let mut out = tokio::io::stdout();
        out.write_all(prompt.as_bytes()).await?;
        out.flush().await?;
        self.lines.next_line().await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> BoxResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    println!("{BANNER}");

    let mut prompter = Prompter::new();

    let (path, lines) = loop {
        let Some(path) = prompter.ask("Please enter the path of the file you want to index! >>> ").await? else {
            return Ok(());
        };
        let path = path.trim().to_string();

        let lines = match FileTextSource::open(&path).await {
            Ok(mut source) => source.read_lines().await,
            Err(e) => Err(e),
        };

        match lines {
            Ok(lines) => break (path, lines),
            Err(e) => {
                error!("Failed to read {path:?}: {e}");
                println!("Unfortunately, this didn't work.");
            }
        }
    };

    let mut max_lines = None;
    if lines.len() > LARGE_INPUT_LINES {
        max_lines = loop {
            let Some(answer) =
                prompter.ask("This seems to be a large file. How many lines do you want to analyze? >>> ").await?
            else {
                return Ok(());
            };

            match answer.trim().parse::<usize>() {
                Ok(limit) if limit <= lines.len() => break Some(limit),
                Ok(limit) => println!("{}", DawgError::InvalidLineLimit(limit, lines.len())),
                Err(_) => println!("Not a number."),
            }
        };
    }

    let verbose = loop {
        let Some(answer) = prompter.ask("Do you prefer a verbose output? (Y/N) >>> ").await? else {
            return Ok(());
        };

        match answer.trim().to_lowercase().as_str() {
            "y" => break true,
            "n" => break false,
            _ => println!("Unfortunately, this didn't work."),
        }
    };

    let config = IndexConfig::new()
        .with_verbose(verbose)
        .with_max_lines(max_lines)
        .with_memory_guard(Some(DEFAULT_MEMORY_GUARD_THRESHOLD));
    let index = DawgIndex::build(&lines, &config)?;

    if !index.outcome().is_complete() {
        println!(
            "It seems like this might be too much data to analyze at once. Indexing was interrupted: {}.",
            index.outcome()
        );
    }

    loop {
        println!("{MENU}");
        let Some(choice) = prompter.ask("Type in the number of your preferred action! >>> ").await? else {
            return Ok(());
        };

        let Ok(choice) = choice.trim().parse::<u32>() else {
            println!("Not a number.");
            continue;
        };

        match choice {
            1 => {
                let mut out = stdout().lock();
                writeln!(out, "=== Edges  ===")?;
                index.dawg().write_edges(&mut out)?;
                writeln!(out, "{SEPARATOR}")?;
            }
            2 => {
                println!("=== Saving ===");
                match save_edges(index.dawg(), &path).await {
                    Ok(edge_path) => println!("Wrote all edge information to {}.", edge_path.display()),
                    Err(e) => {
                        error!("Failed to save edges for {path:?}: {e}");
                        println!("This didn't work ...");
                    }
                }
                println!("{SEPARATOR}");
            }
            3 => {
                println!("=== States ===");
                println!("The DAWG contains {} states in total.", index.dawg().num_states());
                println!("{SEPARATOR}");
            }
            4 => {
                let Some(query) =
                    prompter.ask("Enter a string to check whether or not it is contained in the input file. >>> ").await?
                else {
                    return Ok(());
                };

                let negation = if index.contains_infix(&query) { "" } else { "not " };
                println!("{SEPARATOR}\nThe string {query:?} is {negation}an infix of the input text.\n{SEPARATOR}");
            }
            _ => {
                println!("Done.");
                return Ok(());
            }
        }
    }
}
