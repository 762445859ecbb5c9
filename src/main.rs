use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};

use gpa_tracker::{dispatch, parse_request, Route, Student};

fn main() -> Result<()> {
    gpa_tracker::init_tracing("warn");

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "routes" {
        print_routes();
    } else {
        run_session()?;
    }

    Ok(())
}

fn print_routes() {
    println!("Routes (submit as route?field=value&field=value):");
    for route in Route::ALL {
        println!("  {}", route.as_str());
    }
}

/// Terminal session: one request line in, one rendered page out
fn run_session() -> Result<()> {
    println!("🎓 GPA Tracker v{}", gpa_tracker::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Type a route (e.g. `index`), `routes` for the list, `quit` to exit.\n");

    let mut student = Student::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let page = dispatch(Route::Index, &mut student, &Default::default());
    print!("{}", page.render_text());

    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "routes" => {
                print_routes();
                continue;
            }
            _ => {}
        }

        let (name, form) = parse_request(line);
        let Some(route) = Route::from_name(name) else {
            eprintln!("❌ No route named {:?}. Type `routes` for the list.", name);
            continue;
        };

        let page = dispatch(route, &mut student, &form);
        println!();
        print!("{}", page.render_text());
    }

    println!("\n✅ Session closed");
    Ok(())
}
