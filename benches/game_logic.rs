use blockfall::core::pieces::Piece;
use blockfall::core::{check_collision, Board, GameSnapshot, Session, SessionConfig};
use blockfall::term::{FrameBuffer, GameView, HudView, Viewport};
use blockfall::types::PieceKind;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn running() -> Session {
    let mut session = Session::new(SessionConfig {
        seed: 12345,
        ..SessionConfig::default()
    });
    session.start();
    session
}

fn bench_advance(c: &mut Criterion) {
    let mut session = running();

    c.bench_function("advance_16ms", |b| {
        b.iter(|| {
            if session.is_over() {
                session.restart();
            }
            session.advance(black_box(16));
            session.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let color = PieceKind::I.color_id();
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, color);
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_restart(c: &mut Criterion) {
    let mut session = running();

    c.bench_function("restart", |b| {
        b.iter(|| {
            session.restart();
            session.drain_events().for_each(drop);
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let board = Board::new(10, 20);
    let piece = Piece::spawn(PieceKind::T, 10);

    c.bench_function("check_collision", |b| {
        b.iter(|| check_collision(&board, black_box(&piece), 1, 0, None))
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut session = running();

    c.bench_function("move_rotate", |b| {
        b.iter(|| {
            session.move_left();
            session.rotate();
            session.move_right()
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let session = running();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 30);

    c.bench_function("render_80x30", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            view.render_into(&snap, &HudView::default(), Viewport::new(80, 30), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_line_clear,
    bench_restart,
    bench_collision,
    bench_move_and_rotate,
    bench_render
);
criterion_main!(benches);
