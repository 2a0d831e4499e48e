use std::env;
use std::io::{self, Write};
use std::process;

use tabwriter::TabWriter;

use hmm_decode::{Engine, Model, Result};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!(
            "Usage: {} <generate|forward|viterbi> <model basename> <n | observation file>",
            args[0]
        );
        process::exit(1);
    }

    let model = match Model::from_path(&args[2]) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            process::exit(1);
        }
    };
    let engine = Engine::new(&model);

    let result = match args[1].as_str() {
        "generate" => run_generate(&engine, &args[3]),
        "forward" => run_forward(&engine, &args[3]),
        "viterbi" => run_viterbi(&engine, &args[3]),
        command => {
            eprintln!("ERROR: unknown command: {}", command);
            process::exit(1);
        }
    };
    if let Err(err) = result {
        eprintln!("ERROR: {}", err);
        process::exit(1);
    }
}

// prints the generated observation in its two-line form: states, outputs
fn run_generate(engine: &Engine, n_arg: &str) -> Result<()> {
    let n: usize = match n_arg.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: not a sequence length: {}", n_arg);
            process::exit(1);
        }
    };
    let observation = engine.generate(n, &mut rand::thread_rng())?;
    println!("{}", observation);
    Ok(())
}

fn run_forward(engine: &Engine, obs_path: &str) -> Result<()> {
    for (i, best) in engine.forward_path(obs_path)?.iter().enumerate() {
        println!("{}: {}", i + 1, best.as_deref().unwrap_or("-"));
    }
    Ok(())
}

fn run_viterbi(engine: &Engine, obs_path: &str) -> Result<()> {
    let mut tw = TabWriter::new(io::stdout());
    for decoded in engine.viterbi_path(obs_path)? {
        write!(tw, "{}:", decoded.index)?;
        for state in &decoded.states {
            write!(tw, "\t{}", state.as_deref().unwrap_or("-"))?;
        }
        writeln!(tw)?;
    }
    tw.flush()?;
    Ok(())
}
