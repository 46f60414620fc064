//! End-to-end checks of the session surface: deferred generation, flood
//! reveal, win/loss outcomes, and the per-cell view query.

use minefield_core::{
    Action, CellView, Coord2, GameConfig, GameError, MineLayout, Session, SessionState, neighbors,
};

fn fresh(rows: u16, cols: u16, mines: u32, seed: u64) -> Session {
    Session::new(GameConfig::new(rows, cols, mines).unwrap(), seed)
}

#[test]
fn first_reveal_is_never_a_mine_across_seeds() {
    for seed in 0..100 {
        let mut game = fresh(9, 9, 10, seed);
        let result = game.apply_click((0, 0), Action::Reveal).unwrap();

        assert_ne!(result.state, SessionState::Lost, "seed {} lost on click one", seed);
        assert!(result.changed);
        assert_eq!(game.has_mine_at((0, 0)).unwrap(), false);
        assert!(matches!(game.view((0, 0)).unwrap(), CellView::Open(_)));
    }
}

#[test]
fn generated_adjacency_matches_brute_force_recount() {
    let mut game = fresh(8, 8, 10, 999);
    game.apply_click((0, 0), Action::Reveal).unwrap();

    let layout = game.layout().expect("generated on first reveal");
    let size = layout.size();
    let mut mines_seen = 0u32;

    for row in 0..size.0 {
        for col in 0..size.1 {
            if layout.contains_mine((row, col)) {
                mines_seen += 1;
            }
            let expected = neighbors((row, col), size)
                .filter(|&pos| layout.contains_mine(pos))
                .count() as u8;
            assert_eq!(
                layout.adjacent_mines((row, col)),
                expected,
                "adjacency mismatch at ({}, {})",
                row,
                col
            );
        }
    }
    assert_eq!(mines_seen, game.total_mines());
}

#[test]
fn reveals_are_monotonic_over_arbitrary_action_sequences() {
    let mut game = fresh(6, 6, 5, 77);
    game.apply_click((3, 3), Action::Reveal).unwrap();

    let open_before: Vec<Coord2> = game
        .iter_views()
        .filter(|(_, view)| view.is_open())
        .map(|(coords, _)| coords)
        .collect();
    assert!(!open_before.is_empty());

    'outer: for row in 0..6 {
        for col in 0..6 {
            if (row + col) % 3 == 0 {
                let _ = game.apply_click((row, col), Action::Flag);
            }
            let _ = game.apply_click((row, col), Action::Reveal);
            if game.is_finished() {
                break 'outer;
            }
        }
    }

    for coords in open_before {
        assert!(
            game.view(coords).unwrap().is_open(),
            "cell {:?} reverted to covered",
            coords
        );
    }
}

#[test]
fn flood_opens_the_zero_region_and_one_cell_border_only() {
    // 5x5 with a single mine in a corner: the zero region spans everything
    // except the mine's neighborhood; its border opens with counts; the
    // mine itself stays covered.
    let layout = MineLayout::from_mine_coords((5, 5), &[(0, 0)]).unwrap();
    let mut game = Session::with_layout(layout);

    let result = game.apply_click((4, 4), Action::Reveal).unwrap();

    assert_eq!(result.state, SessionState::Won);
    assert_eq!(game.view((0, 0)).unwrap(), CellView::Unknown);
    assert_eq!(game.view((0, 1)).unwrap(), CellView::Open(1));
    assert_eq!(game.view((1, 1)).unwrap(), CellView::Open(1));
    assert_eq!(game.view((1, 0)).unwrap(), CellView::Open(1));
    assert_eq!(game.view((0, 2)).unwrap(), CellView::Open(0));
    assert_eq!(game.view((2, 2)).unwrap(), CellView::Open(0));
}

#[test]
fn flood_leaves_flagged_safe_cells_covered() {
    // Mine in a corner, flag on a safe zero cell in the middle: the flood
    // washes around the flag without opening it, so the game cannot be won
    // until the player unflags and reveals it.
    let layout = MineLayout::from_mine_coords((5, 5), &[(0, 0)]).unwrap();
    let mut game = Session::with_layout(layout);

    game.apply_click((2, 2), Action::Flag).unwrap();
    let result = game.apply_click((4, 4), Action::Reveal).unwrap();

    assert_eq!(result.state, SessionState::Active);
    assert_eq!(game.view((2, 2)).unwrap(), CellView::Flagged);
    assert_eq!(game.revealed_safe_count(), 23);

    game.apply_click((2, 2), Action::Flag).unwrap();
    let result = game.apply_click((2, 2), Action::Reveal).unwrap();

    assert_eq!(result.state, SessionState::Won);
    assert_eq!(game.view((2, 2)).unwrap(), CellView::Open(0));
}

#[test]
fn flood_does_not_cross_a_wall_of_counts() {
    // Mines down the middle column split the board; revealing on the left
    // must leave the right side covered.
    let layout =
        MineLayout::from_mine_coords((3, 5), &[(0, 2), (1, 2), (2, 2)]).unwrap();
    let mut game = Session::with_layout(layout);

    game.apply_click((1, 0), Action::Reveal).unwrap();

    assert!(game.view((0, 0)).unwrap().is_open());
    assert!(game.view((2, 1)).unwrap().is_open());
    assert_eq!(game.view((0, 4)).unwrap(), CellView::Unknown);
    assert_eq!(game.view((2, 3)).unwrap(), CellView::Unknown);
    assert_eq!(game.state(), SessionState::Active);
}

#[test]
fn win_arrives_exactly_on_the_last_safe_cell() {
    // Spec scenario: 3x3, one mine outside the first click's safe zone is
    // impossible (the zone covers the board), so pin the mine instead.
    let layout = MineLayout::from_mine_coords((3, 3), &[(0, 2)]).unwrap();
    let mut game = Session::with_layout(layout);

    let safe: Vec<Coord2> = (0..3)
        .flat_map(|row| (0..3).map(move |col| (row, col)))
        .filter(|&coords| coords != (0, 2))
        .collect();
    assert_eq!(safe.len(), 8);

    let mut won_at = None;
    for (i, &coords) in safe.iter().enumerate() {
        let result = game.apply_click(coords, Action::Reveal).unwrap();
        if result.state == SessionState::Won {
            won_at = Some(i);
            break;
        }
    }

    // Flood fill may finish the board early; the win must coincide with
    // the moment the count of open safe cells reaches eight, and the state
    // must never be Won while any safe cell is still covered.
    assert!(won_at.is_some());
    assert_eq!(game.revealed_safe_count(), 8);
    for &coords in &safe {
        assert!(game.view(coords).unwrap().is_open());
    }
}

#[test]
fn loss_exposes_all_mines_even_flagged_ones() {
    let layout = MineLayout::from_mine_coords((4, 4), &[(0, 0), (3, 3), (1, 2)]).unwrap();
    let mut game = Session::with_layout(layout);

    game.apply_click((3, 3), Action::Flag).unwrap();
    let result = game.apply_click((0, 0), Action::Reveal).unwrap();

    assert_eq!(result.state, SessionState::Lost);
    assert_eq!(game.detonated(), Some((0, 0)));
    for coords in [(0, 0), (3, 3), (1, 2)] {
        assert_eq!(game.view(coords).unwrap(), CellView::Exploded);
    }
    // Safe cells stay as they were.
    assert_eq!(game.view((2, 0)).unwrap(), CellView::Unknown);
}

#[test]
fn configuration_errors_are_rejected_up_front() {
    assert!(matches!(
        GameConfig::new(0, 5, 1),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameConfig::new(3, 3, 9),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(GameConfig::new(3, 3, 8).is_ok());
}

#[test]
fn mine_count_too_large_for_safe_zone_fails_at_generation() {
    // 8 mines fit a 4x4 board but not the 7 candidates left by an interior
    // first click; the engine reports the configuration error instead of
    // silently under-filling.
    let mut game = fresh(4, 4, 8, 3);
    let result = game.apply_click((1, 1), Action::Reveal);

    assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
    assert!(!game.is_generated());
}

#[test]
fn full_redraw_query_covers_every_cell() {
    let mut game = fresh(5, 7, 6, 11);
    game.apply_click((2, 3), Action::Reveal).unwrap();

    let views: Vec<(Coord2, CellView)> = game.iter_views().collect();
    assert_eq!(views.len(), 35);
    for (coords, view) in views {
        assert_eq!(game.view(coords).unwrap(), view);
    }
}
