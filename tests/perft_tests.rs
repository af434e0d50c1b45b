#[cfg(test)]
mod tests {
    use trichess::game_state::GameState;
    use trichess::logger::init_logging;
    use trichess::moves::perft::{perft, perft_count, perft_divide, perft_parallel};

    fn setup() -> GameState {
        init_logging("logs/perft.log", "trichess::moves::perft=debug");
        GameState::new_game()
    }

    #[test]
    fn perft_startpos_depth_1() {
        let s = setup();
        assert_eq!(perft(&s, 0), 1);
        assert_eq!(perft(&s, 1), 22);
    }

    #[test]
    fn perft_breakdown_depth_1() {
        let s = setup();
        let c = perft_count(&s, 1);
        assert_eq!(c.nodes, 22);
        // the two knight captures over the moats
        assert_eq!(c.captures, 2);
        assert_eq!(c.castles, 0);
        assert_eq!(c.promotions, 0);
        assert_eq!(c.eliminations, 0);
    }

    #[test]
    fn parallel_matches_sequential_depth_2() {
        let s = setup();
        let seq = perft(&s, 2);
        assert!(seq > 22);
        assert_eq!(perft_parallel(&s, 2), seq);
        assert_eq!(perft_count(&s, 2).nodes, seq);
    }

    #[test]
    fn divide_sums_to_total() {
        let s = setup();
        let split = perft_divide(&s, 2);
        assert_eq!(split.len(), 22);
        let total: u64 = split.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&s, 2));
    }
}
