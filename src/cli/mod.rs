pub mod commands;

use std::io::{self, BufRead, Write};

use crate::cli::commands::Commands;
use crate::client::{
    session::{ERROR_MARKER, QUICK_PROMPTS},
    AgentClient, ChatSession, HttpAgentClient,
};

/// Runs the client-side subcommands. `serve` is handled by `main`.
pub async fn run_cli(command: Commands) -> io::Result<()> {
    match command {
        Commands::Serve => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "serve is started by the server entry point",
        )),
        Commands::Ask { input, url } => {
            let client = HttpAgentClient::new(&url);
            let output = client
                .ask(&input)
                .await
                .map_err(|e| io::Error::other(format!("{} {}", ERROR_MARKER, e)))?;
            println!("{}", output);
            Ok(())
        }
        Commands::Chat { url } => run_repl(&url).await,
    }
}

async fn run_repl(url: &str) -> io::Result<()> {
    let client = HttpAgentClient::new(url);
    let mut session = ChatSession::with_greeting();

    println!("--- Scout Terminal Chat ---");
    println!("Connected to: {}", client.endpoint());
    println!("Type /exit to quit.");
    println!("---------------------------");
    print_new(&session, 0);

    if session.messages().len() == 1 {
        println!("\nTry one of these:");
        for prompt in QUICK_PROMPTS {
            println!("  - {}", prompt);
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nYou> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let text = line.trim();

        if text == "/exit" || text == "/quit" {
            break;
        }

        session.set_input(text);
        if !session.can_submit() {
            continue;
        }

        let seen = session.messages().len();
        println!("Agent is typing...");
        let input = session.pending_input().to_string();
        session.submit(&input, &client).await;
        // Skip the echo of the user's own line.
        print_new(&session, seen + 1);
    }

    Ok(())
}

fn print_new(session: &ChatSession, from: usize) {
    for line in session.render().iter().skip(from) {
        println!("{}", line);
    }
}
