/// Preview — generate passages from a JSON grammar on the command line.
///
/// Usage: preview <grammar.json> [--source <id>] [--count <n>] [--seed <n>]

use std::path::Path;
use std::process;

use prose_grammar::{expand, FilterRegistry, GrammarDocument, StdRandom};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let grammar_path = args[1].clone();
    let mut source_id: Option<String> = None;
    let mut count: usize = 1;
    let mut seed: Option<u64> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--source" if i + 1 < args.len() => {
                i += 1;
                source_id = Some(args[i].clone());
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or(1);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().ok();
            }
            other => {
                eprintln!("unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let grammar = match GrammarDocument::load_from_json(Path::new(&grammar_path)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("failed to load grammar: {}", e);
            process::exit(1);
        }
    };

    let filters = FilterRegistry::new();
    let mut rng = match seed {
        Some(s) => StdRandom::seeded(s),
        None => StdRandom::from_entropy(),
    };

    for _ in 0..count {
        let result = match source_id {
            Some(ref id) => grammar
                .source_from(id, &mut rng)
                .and_then(|node| expand(node, &grammar, &filters, &mut rng))
                .map(|tokens| tokens.concat()),
            None => grammar.generate(&filters, &mut rng),
        };
        match result {
            Ok(text) => println!("{}", text.trim_end()),
            Err(e) => {
                eprintln!("generation failed: {}", e);
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("preview — generate passages from a JSON grammar");
    println!();
    println!("Usage: preview <grammar.json> [options]");
    println!();
    println!("Options:");
    println!("  --source <id>   category to start from (default: section)");
    println!("  --count <n>     number of passages to generate (default: 1)");
    println!("  --seed <n>      RNG seed for reproducible output");
}
