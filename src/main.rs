use mark2drop::rewrite::{rewrite_in_place, Rule};
use mark2drop::tools::*;

fn main() -> Result<(), anyhow::Error> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = match args.as_slice() {
        [path] => path,
        _ => {
            println!("Usage: mark2drop <path_to_json_file>");
            std::process::exit(1);
        }
    };

    let mut program = read_json(path)?;
    println!("{}  Loaded {}", now(), path);

    let rewritten = rewrite_in_place(&Rule::default(), &mut program);
    println!("{}  Rewrote {} mark_to_drop action(s)", now(), rewritten);

    write_json(path, &program)?;
    println!("{}  Saved {}", now(), path);
    Ok(())
}
