use std::time::Instant;

use rs_suggest_core::trie::prefix_trie::PrefixTrie;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Dictionary path can be overridden from the command line
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/usr/share/dict/words".to_owned());

    // Load the word list (one word per line, blank lines skipped);
    // the file is split into chunks, partial tries are built in
    // parallel and then merged
    let start = Instant::now();
    let mut completer = PrefixTrie::from_word_file(&path)?;
    println!(
        "Inserted {} words in {:.3} seconds",
        completer.word_count(),
        start.elapsed().as_secs_f64()
    );

    // First pass: every matching word sits at the same baseline count,
    // so the ranking falls back to lexicographic order
    let suggestions = completer.suggest("piz");
    println!("Suggestions for 'piz': {:?}", suggestions);

    // Record a selection; the chosen word ranks higher the next time
    // the same prefix is queried
    if let Some(last) = suggestions.last() {
        completer.select("piz", last)?;
        println!("Selected {:?} under 'piz'", last);
    }
    println!("Suggestions for 'piz': {:?}", completer.suggest("piz"));

    // Selecting a word that was never inserted fails without touching
    // the trie
    match completer.select("piz", "not a word") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Selection rejected: {}", e),
    }

    Ok(())
}
