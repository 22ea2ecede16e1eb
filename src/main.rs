use anti_2048::engine::GameState;
use anti_2048::minimax::Minimax;

fn main() {
    let mut rng = rand::thread_rng();
    let mut search = Minimax::new();
    let mut state = GameState::new(&mut rng);
    println!("{}", state.board());
    let mut total_nodes: u64 = 0;
    let mut peak_nodes: u64 = 0;
    while !state.is_lost() {
        let dir = match search.best_move(*state.board()) {
            Some(dir) => dir,
            None => break,
        };
        state = state.apply_move_and_spawn(dir, &mut rng);
        println!("{}", state.board());
        let stats = search.last_stats();
        total_nodes = total_nodes.saturating_add(stats.nodes);
        peak_nodes = peak_nodes.max(stats.nodes);
    }
    println!(
        "Moves made: {}, states considered: {}, max states considered for a move: {}",
        state.moves_made(),
        total_nodes,
        peak_nodes
    );
}
