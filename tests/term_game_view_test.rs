use std::sync::Arc;

use tui_nim::core::{GameState, StrategyTable, TableMeta, Timings};
use tui_nim::term::{GameView, HitTarget, Viewport, OVERSIZED_TEXT};
use tui_nim::types::TICK_MS;

fn new_game(sizes: &[u32]) -> GameState {
    let mut game = GameState::new(sizes, Timings::instant(), Some(1)).unwrap();
    game.provide_table(Arc::new(StrategyTable::empty()));
    game
}

#[test]
fn term_view_lays_out_labels_and_bars() {
    let snap = new_game(&[1, 3, 5, 7]).snapshot();
    let view = GameView::default();
    let fb = view.render(&snap, None, Viewport::new(40, 24));

    // Rows every second line from y=2; bars two columns apart from x=5.
    for (i, label) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
        let y = 2 + 2 * i as u16;
        assert_eq!(fb.get(2, y).unwrap().ch, label);
    }
    assert_eq!(fb.get(5, 8).unwrap().ch, 'I');
    assert_eq!(fb.get(5 + 6 * 2, 8).unwrap().ch, 'I');
    assert_eq!(fb.get(5 + 7 * 2, 8).unwrap().ch, ' ');
    assert!(fb.row_text(11).contains("[ Submit ]"));
}

#[test]
fn term_view_hit_test_matches_render() {
    let snap = new_game(&[1, 3, 5, 7]).snapshot();
    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let fb = view.render(&snap, None, vp);

    for y in 0..vp.height {
        for x in 0..vp.width {
            if let Some(HitTarget::Bar { row, bar }) = view.hit_test(&snap, vp, x, y) {
                assert_eq!(fb.get(x, y).unwrap().ch, 'I', "row {row} bar {bar}");
            }
        }
    }
    assert_eq!(
        view.hit_test(&snap, vp, 5 + 3 * 2, 8),
        Some(HitTarget::Bar { row: 3, bar: 3 })
    );
    // The blank column between two bars is not a target.
    assert_eq!(view.hit_test(&snap, vp, 6, 8), None);
    assert_eq!(view.hit_test(&snap, vp, 5 + 6 * 2 + 1, 8), None);
    assert_eq!(view.hit_test(&snap, vp, 2, 11), Some(HitTarget::Button));
    assert_eq!(view.hit_test(&snap, vp, 2, 2), None);
}

#[test]
fn term_view_greys_staged_bars() {
    let mut game = new_game(&[1, 3, 5, 7]);
    game.select_bar(3, 4);
    for _ in 0..4 {
        game.tick(TICK_MS).unwrap();
    }
    let fb = GameView::default().render(&game.snapshot(), None, Viewport::new(40, 24));

    assert!(!fb.get(5 + 3 * 2, 8).unwrap().style.dim);
    for bar in 4..7 {
        assert!(fb.get(5 + bar * 2, 8).unwrap().style.dim, "bar {bar}");
    }
}

#[test]
fn term_view_highlights_cursor_only_while_playable() {
    let mut game = new_game(&[3]);
    let view = GameView::default();
    let vp = Viewport::new(40, 24);

    let plain = view.render(&game.snapshot(), None, vp);
    let with_cursor = view.render(&game.snapshot(), Some((0, 1)), vp);
    assert_ne!(plain.get(7, 2).unwrap().style.bg, with_cursor.get(7, 2).unwrap().style.bg);

    game.select_bar(0, 2);
    game.submit();
    let submitting = view.render(&game.snapshot(), Some((0, 1)), vp);
    assert_eq!(plain.get(7, 2).unwrap().style.bg, submitting.get(7, 2).unwrap().style.bg);
}

#[test]
fn term_view_shows_banner_and_restart_after_win() {
    let mut game = new_game(&[2]);
    game.select_bar(0, 0);
    game.submit();
    for _ in 0..20 {
        game.tick(TICK_MS).unwrap();
    }
    let snap = game.snapshot();
    assert_eq!(snap.banner.map(|b| b.progress), Some(1.0));

    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let fb = view.render(&snap, None, vp);
    let text: Vec<String> = (0..vp.height).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|l| l.contains("You won !")));
    assert!(text.iter().any(|l| l.contains("[ Restart ]")));
}

#[test]
fn term_view_oversized_board_shows_only_warning() {
    let mut game = GameState::new(&[1, 3, 5, 8], Timings::instant(), Some(1)).unwrap();
    game.provide_table(Arc::new(StrategyTable {
        meta: TableMeta {
            max_length: 7,
            max_height: 4,
        },
        data: Default::default(),
    }));
    let snap = game.snapshot();
    assert!(snap.oversized);

    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let fb = view.render(&snap, None, vp);
    let lines: Vec<String> = (0..vp.height)
        .map(|y| fb.row_text(y).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(lines, vec![OVERSIZED_TEXT.to_string()]);
    assert_eq!(view.hit_test(&snap, vp, 5, 2), None);
}
