use space_invaders::config::GameConfig;
use space_invaders::entities::*;
use space_invaders::input::KeyState;

use rand::rngs::StdRng;
use rand::SeedableRng;

const IDLE: KeyState = KeyState { left: false, right: false, fire: false };
const LEFT: KeyState = KeyState { left: true, right: false, fire: false };
const RIGHT: KeyState = KeyState { left: false, right: true, fire: false };
const BOTH: KeyState = KeyState { left: true, right: true, fire: false };

fn config() -> GameConfig {
    GameConfig::default()
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_centred_near_bottom() {
    let p = Player::new(&config());
    assert_eq!(p.bounds.centerx(), 400);
    assert_eq!(p.bounds.bottom(), 580); // height - 20
    assert_eq!((p.bounds.width, p.bounds.height), (64, 64));
}

#[test]
fn player_moves_by_speed() {
    let mut p = Player::new(&config());
    let x = p.bounds.x;
    p.update(&LEFT);
    assert_eq!(p.bounds.x, x - 6);
    p.update(&RIGHT);
    p.update(&RIGHT);
    assert_eq!(p.bounds.x, x + 6);
}

#[test]
fn player_both_keys_cancel_out() {
    let mut p = Player::new(&config());
    let x = p.bounds.x;
    p.update(&BOTH);
    assert_eq!(p.bounds.x, x);
}

#[test]
fn player_ignores_fire_key_and_never_moves_vertically() {
    let mut p = Player::new(&config());
    let before = p.bounds;
    let fate = p.update(&KeyState { fire: true, ..IDLE });
    assert_eq!(p.bounds, before);
    assert_eq!(fate, Fate::Alive);
}

#[test]
fn player_clamps_at_left_edge() {
    let mut p = Player::new(&config());
    p.bounds.x = 3;
    p.update(&LEFT);
    assert_eq!(p.bounds.left(), 0);
}

#[test]
fn player_clamps_at_right_edge() {
    let mut p = Player::new(&config());
    p.bounds.x = 800 - 64 - 2;
    p.update(&RIGHT);
    assert_eq!(p.bounds.right(), 800);
}

#[test]
fn player_stays_on_screen_for_any_input_sequence() {
    let mut p = Player::new(&config());
    let inputs = [LEFT, RIGHT, BOTH, IDLE];
    // Deterministic pseudo-random walk, heavy on long runs in one direction
    for i in 0..2_000usize {
        let keys = inputs[(i / 37 + i * i) % inputs.len()];
        p.update(&keys);
        assert!(p.bounds.left() >= 0);
        assert!(p.bounds.left() <= 800 - 64);
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_spawns_centred_with_bottom_at_y() {
    let b = Bullet::new(config().sprites.laser, 400, 580, -10);
    assert_eq!(b.bounds.centerx(), 400);
    assert_eq!(b.bounds.bottom(), 580);
}

#[test]
fn bullet_rises_ten_per_update_and_expires_below_zero() {
    let mut b = Bullet::new(config().sprites.laser, 400, 580, -10);
    for i in 1..=58 {
        assert_eq!(b.update(&IDLE), Fate::Alive);
        assert_eq!(b.bounds.bottom(), 580 - i * 10);
    }
    assert_eq!(b.bounds.bottom(), 0);
    assert_eq!(b.update(&IDLE), Fate::Expired);
    assert_eq!(b.bounds.bottom(), -10);
}

#[test]
fn bullet_ignores_keys() {
    let mut a = Bullet::new(config().sprites.laser, 100, 300, -10);
    let mut b = a.clone();
    a.update(&LEFT);
    b.update(&IDLE);
    assert_eq!(a.bounds, b.bounds);
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_speed_is_within_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let a = Alien::new(&config(), 100, -60, &mut rng);
        assert!((2..=5).contains(&a.speed));
        assert_eq!((a.bounds.x, a.bounds.y), (100, -60));
    }
}

#[test]
fn alien_falls_by_its_own_speed_and_expires_past_bottom() {
    let mut a = Alien::with_speed(&config(), 100, 590, 4);
    assert_eq!(a.update(&RIGHT), Fate::Alive);
    assert_eq!(a.bounds.top(), 594);
    assert_eq!(a.update(&IDLE), Fate::Alive);
    assert_eq!(a.bounds.top(), 598);
    assert_eq!(a.update(&IDLE), Fate::Expired); // 602 > 600
    assert_eq!(a.bounds.top(), 602);
}

#[test]
fn alien_expires_on_first_update_past_height() {
    let mut a = Alien::with_speed(&config(), 100, 598, 2);
    assert_eq!(a.update(&IDLE), Fate::Alive); // top = 600, not > 600
    assert_eq!(a.update(&IDLE), Fate::Expired); // top = 602
}
