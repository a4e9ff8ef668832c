use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use block_list::{LinkedList, ListConfig, MemoryBlock};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "block-list", about = "Replay operations against a linked list of memory blocks")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `block_list=trace`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Node slots to reserve up front.
    #[arg(long, global = true, default_value_t = 0)]
    capacity: usize,
    /// Validate list invariants after every mutation.
    #[arg(long, global = true)]
    check_invariants: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a script of list operations (one per line).
    Replay {
        /// Script file.
        script: PathBuf,
        /// Print the list after every mutation.
        #[arg(long)]
        trace: bool,
        /// Log failed operations and continue instead of aborting.
        #[arg(long)]
        keep_going: bool,
    },
    /// Run the built-in walkthrough.
    Demo,
}

/// Errors raised while parsing a script line.
#[derive(Debug, Error, PartialEq, Eq)]
enum ScriptError {
    #[error("unknown operation '{0}'")]
    UnknownOp(String),
    #[error("'{op}' expects {expected} argument(s), got {got}")]
    Arity {
        op: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// One script operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    First(MemoryBlock),
    Last(MemoryBlock),
    Add(usize, MemoryBlock),
    Remove(usize),
    RemoveFirst,
    RemoveLast,
    RemoveBlock(MemoryBlock),
    Get(usize),
    Find(MemoryBlock),
    Print,
    Size,
}

impl Op {
    fn is_mutation(&self) -> bool {
        !matches!(self, Op::Get(_) | Op::Find(_) | Op::Print | Op::Size)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = ListConfig::default()
        .with_capacity(cli.capacity)
        .check_invariants(cli.check_invariants || cfg!(debug_assertions));

    match cli.command {
        Commands::Replay {
            script,
            trace,
            keep_going,
        } => run_replay(script, config, trace, keep_going)?,
        Commands::Demo => run_demo(config)?,
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_replay(script_path: PathBuf, config: ListConfig, trace: bool, keep_going: bool) -> Result<()> {
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read script {}", script_path.display()))?;
    let mut list = LinkedList::with_config(config);

    for (line_no, line) in script.lines().enumerate() {
        let line_no = line_no + 1;
        let op = match parse_line(line).with_context(|| format!("line {}: cannot parse", line_no))? {
            Some(op) => op,
            None => continue,
        };

        match apply(&mut list, op) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(err) if keep_going => {
                warn!(line = line_no, ?op, %err, "operation failed");
                continue;
            }
            Err(err) => return Err(err.context(format!("line {}: {:?} failed", line_no, op))),
        }

        if trace && op.is_mutation() {
            println!("{:>4}: {}", line_no, list);
        }
    }

    info!(size = list.get_size(), "replay finished");
    println!("{}", list);
    Ok(())
}

fn parse_line(line: &str) -> Result<Option<Op>, ScriptError> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let name = fields.next().unwrap_or_default();
    let args: Vec<&str> = fields.collect();

    let expect = |expected: usize| -> Result<Vec<usize>, ScriptError> {
        if args.len() != expected {
            return Err(ScriptError::Arity {
                op: name.to_string(),
                expected,
                got: args.len(),
            });
        }
        args.iter()
            .map(|arg| {
                arg.parse::<usize>()
                    .map_err(|_| ScriptError::InvalidNumber(arg.to_string()))
            })
            .collect()
    };

    let op = match name {
        "first" => {
            let n = expect(2)?;
            Op::First(MemoryBlock::new(n[0], n[1]))
        }
        "last" => {
            let n = expect(2)?;
            Op::Last(MemoryBlock::new(n[0], n[1]))
        }
        "add" => {
            let n = expect(3)?;
            Op::Add(n[0], MemoryBlock::new(n[1], n[2]))
        }
        "remove" => Op::Remove(expect(1)?[0]),
        "remove-first" => {
            expect(0)?;
            Op::RemoveFirst
        }
        "remove-last" => {
            expect(0)?;
            Op::RemoveLast
        }
        "remove-block" => {
            let n = expect(2)?;
            Op::RemoveBlock(MemoryBlock::new(n[0], n[1]))
        }
        "get" => Op::Get(expect(1)?[0]),
        "find" => {
            let n = expect(2)?;
            Op::Find(MemoryBlock::new(n[0], n[1]))
        }
        "print" => {
            expect(0)?;
            Op::Print
        }
        "size" => {
            expect(0)?;
            Op::Size
        }
        other => return Err(ScriptError::UnknownOp(other.to_string())),
    };
    Ok(Some(op))
}

/// First block in the list whose contents equal `wanted`.
fn lookup(list: &LinkedList<MemoryBlock>, wanted: &MemoryBlock) -> Option<Rc<MemoryBlock>> {
    list.iter().find(|block| ***block == *wanted).cloned()
}

fn apply(list: &mut LinkedList<MemoryBlock>, op: Op) -> Result<Option<String>> {
    let output = match op {
        Op::First(block) => {
            list.add_first(Rc::new(block));
            None
        }
        Op::Last(block) => {
            list.add_last(Rc::new(block));
            None
        }
        Op::Add(index, block) => {
            list.add(index, Rc::new(block))?;
            None
        }
        Op::Remove(index) => {
            list.remove(index)?;
            None
        }
        Op::RemoveFirst => {
            list.remove_first()?;
            None
        }
        Op::RemoveLast => {
            list.remove_last()?;
            None
        }
        Op::RemoveBlock(wanted) => {
            let block = lookup(list, &wanted).ok_or(block_list::ListError::NotFound)?;
            list.remove_block(&block)?;
            None
        }
        Op::Get(index) => Some(list.get_block(index)?.to_string()),
        Op::Find(wanted) => Some(match lookup(list, &wanted).and_then(|b| list.index_of(&b)) {
            Some(index) => index.to_string(),
            None => "-1".to_string(),
        }),
        Op::Print => Some(list.to_string()),
        Op::Size => Some(list.get_size().to_string()),
    };
    Ok(output)
}

fn run_demo(config: ListConfig) -> Result<()> {
    let a = Rc::new(MemoryBlock::new(0, 10));
    let b = Rc::new(MemoryBlock::new(10, 20));
    let c = Rc::new(MemoryBlock::new(30, 5));

    let mut list = LinkedList::with_config(config);
    list.add_last(Rc::clone(&a));
    list.add_last(Rc::clone(&b));
    list.add_last(Rc::clone(&c));
    println!("add_last A B C      -> {}", list);

    let x = Rc::new(MemoryBlock::new(100, 1));
    list.add_first(Rc::clone(&x));
    println!("add_first X         -> {}", list);

    let y = Rc::new(MemoryBlock::new(200, 2));
    list.add(2, Rc::clone(&y))?;
    println!("add(2, Y)           -> {}", list);
    println!("index_of(Y)         -> {:?}", list.index_of(&y));

    list.remove(1)?;
    println!("remove(1)           -> {}", list);

    list.remove_block(&c)?;
    println!("remove_block(C)     -> {}", list);

    match list.get_node(5) {
        Ok(_) => println!("get_node(5)         -> unexpected success"),
        Err(err) => println!("get_node(5)         -> error: {}", err),
    }

    while list.remove_first().is_ok() {}
    println!("drained             -> size {}", list.get_size());
    Ok(())
}
