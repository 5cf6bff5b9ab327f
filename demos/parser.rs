// Lazily parses an arithmetic expression, printing one token per resume.
//
// The parser is an ordinary recursive-descent recognizer. Its token callback
// suspends a coroutine, so this driver pulls tokens one at a time while the
// parser's call stack stays suspended in between.
//
//     cargo run --example parser -- "2*(3+4)"
//     cargo run --example parser -- "1+)"

use std::process::ExitCode;

use argh::FromArgs;
use symco::{Builder, StackSize, TokenStream};

#[derive(FromArgs)]
/// Parse an arithmetic expression one token at a time.
struct Args {
    /// the expression to parse
    #[argh(positional, default = "String::from(\"1+1\")")]
    expression: String,

    /// stack size for the parser coroutine, in machine words
    #[argh(option)]
    stack_words: Option<usize>,
}

fn main() -> ExitCode {
    let _ = env_logger::builder().try_init();
    let args: Args = argh::from_env();

    let stack_size = args
        .stack_words
        .map_or(StackSize::Default, StackSize::Words);
    let builder = Builder::new().name("parser").stack_size(stack_size);
    let stream = match TokenStream::with_builder(builder, args.expression.chars()) {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("Cannot start the parser: {err}");
            return ExitCode::FAILURE;
        }
    };

    for item in stream {
        match item {
            Ok(token) => println!("Parsed: {token}"),
            Err(err) => {
                eprintln!("Error: {err}");
                eprintln!("  {}", args.expression);
                eprintln!("  {}^", " ".repeat(err.position()));
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
