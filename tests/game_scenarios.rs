use std::collections::VecDeque;
use std::time::Duration;

use classic_snake::game::{
    Cell, CollisionType, Command, Direction, GameConfig, GameEngine, GamePhase, ManualClock,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

type TestEngine = GameEngine<ManualClock, VecDeque<Command>>;

fn engine_with(config: GameConfig, seed: u64) -> TestEngine {
    GameEngine::new(config, ManualClock::new(), VecDeque::new(), StdRng::seed_from_u64(seed))
        .expect("valid config")
}

#[test]
fn start_from_idle_first_game() {
    let mut engine = engine_with(GameConfig::default(), 11);
    assert_eq!(engine.direction(), Direction::NotMoving);
    assert_eq!(engine.snake().head(), Some(Cell::new(200, 200, 10)));

    engine.handle_command(Command::Start);

    assert_eq!(engine.direction(), Direction::Right);
    assert!(engine.is_started());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.snake().len(), 6);
}

#[test]
fn eating_food_scores_and_grows() {
    let mut engine = engine_with(GameConfig::default(), 12);
    engine.handle_command(Command::Start);
    let head = engine.snake().head().unwrap();
    let food = head.moved_in_direction(Direction::Right);
    engine.set_food(food);

    let info = engine.tick();

    assert!(info.ate_food);
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.snake().len(), 11);
    assert_ne!(engine.food(), food);
    assert!(!engine.snake().occupies(&engine.food()));
    assert!(engine.grid().contains(&engine.food()));
}

#[test]
fn leaving_through_left_wall_ends_game() {
    let config = GameConfig {
        default_position: (10, 50),
        ..GameConfig::small()
    };
    let mut engine = engine_with(config, 13);
    engine.handle_command(Command::Start);
    engine.set_food(Cell::new(90, 90, 10));

    engine.handle_command(Command::Turn(Direction::Up));
    engine.tick();
    engine.handle_command(Command::Turn(Direction::Left));
    engine.tick();
    assert_eq!(engine.snake().head(), Some(Cell::new(0, 40, 10)));
    assert!(!engine.is_ended());

    let info = engine.tick();
    assert_eq!(engine.snake().head(), Some(Cell::new(-10, 40, 10)));
    assert_eq!(info.collision_type, Some(CollisionType::Wall));
    assert_eq!(engine.phase(), GamePhase::Ended);
}

#[test]
fn leaving_through_right_and_bottom_walls_ends_game() {
    let config = GameConfig {
        default_position: (90, 90),
        ..GameConfig::small()
    };
    let mut engine = engine_with(config.clone(), 14);
    engine.handle_command(Command::Start);
    engine.set_food(Cell::new(0, 0, 10));
    engine.tick();
    assert_eq!(engine.collision(), Some(CollisionType::Wall));

    let mut engine = engine_with(config, 15);
    engine.handle_command(Command::Start);
    engine.set_food(Cell::new(0, 0, 10));
    engine.handle_command(Command::Turn(Direction::Down));
    engine.tick();
    assert_eq!(engine.snake().head(), Some(Cell::new(90, 100, 10)));
    assert_eq!(engine.collision(), Some(CollisionType::Wall));
}

#[test]
fn speed_up_at_top_level_keeps_interval() {
    let config = GameConfig {
        initial_speed: 6,
        ..Default::default()
    };
    let mut engine = engine_with(config, 16);
    engine.handle_command(Command::Start);
    assert_eq!(engine.tick_interval(), Duration::from_millis(1));

    engine.handle_command(Command::SpeedUp);

    assert_eq!(engine.speed().get(), 6);
    assert_eq!(engine.tick_interval(), Duration::from_millis(1));
    assert_eq!(engine.ticker().period, Some(Duration::from_millis(1)));
}

#[test]
fn compatibility_over_all_direction_pairs() {
    let mut engine = engine_with(GameConfig::default(), 17);

    for current in Direction::ALL {
        for next in Direction::ALL {
            engine.snake_mut().direction = current;
            let reversal = matches!(
                (current, next),
                (Direction::Left, Direction::Right)
                    | (Direction::Right, Direction::Left)
                    | (Direction::Up, Direction::Down)
                    | (Direction::Down, Direction::Up)
            );
            let expected = next != current && !reversal;
            assert_eq!(
                engine.is_compatible(next),
                expected,
                "{:?} -> {:?}",
                current,
                next
            );
        }
    }
}

#[test]
fn food_can_end_up_under_the_body() {
    // Play alone never covers the food (see food_never_sits_under_the_snake),
    // but occupancy is only checked when food is placed, so food forced onto
    // the body stays there uneaten
    let config = GameConfig {
        default_position: (50, 50),
        ..GameConfig::small()
    };
    let mut engine = engine_with(config, 18);
    engine.handle_command(Command::Start);
    engine.set_food(Cell::new(0, 0, 10));
    for _ in 0..3 {
        engine.tick();
    }
    let body_cell = engine.snake().segment_at(2).unwrap();
    engine.set_food(body_cell);

    engine.tick();
    assert!(engine.snake().occupies(&engine.food()));
    assert_eq!(engine.score(), 0);
}

#[test]
fn paused_game_resumes_where_it_stopped() {
    let mut engine = engine_with(GameConfig::default(), 19);
    engine.handle_command(Command::Start);
    engine.set_food(Cell::new(0, 0, 10));
    engine.tick();
    let before = engine.snapshot();

    engine.handle_command(Command::TogglePause);
    for _ in 0..5 {
        assert!(!engine.tick().advanced);
    }
    assert_eq!(engine.snapshot().segments, before.segments);

    engine.handle_command(Command::TogglePause);
    engine.tick();
    assert_eq!(engine.snake().head(), Some(Cell::new(220, 200, 10)));
}
