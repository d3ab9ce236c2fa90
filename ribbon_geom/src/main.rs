//! Interactive dump of a compiled ribbon strip for a synthetic gesture.

use ribbon_geom::{Ribbon, MAX_THICKNESS, MIN_THICKNESS};
use std::io::{self, Write};

const SURFACE_W: i32 = 800;
const SURFACE_H: i32 = 600;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             Ribbon Strip Inspector                   ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    loop {
        println!("  1. Straight line   2. Zig-zag   3. Spiral   q. Quit");
        let choice = read_line("Shape: ");
        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let n: usize = read_line("  Points (default 12): ")
            .trim().parse().unwrap_or(12);
        let n = n.max(2).min(ribbon_geom::CAPACITY);

        let thickness: f64 = read_line("  Thickness (default 20): ")
            .trim().parse().ok()
            .filter(|t: &f64| t.is_finite())
            .unwrap_or(20.0);

        let sine = read_line("  Sine pressure profile? (y/N): ")
            .trim().eq_ignore_ascii_case("y");

        let frames: usize = read_line("  Advance frames (default 0): ")
            .trim().parse().unwrap_or(0);

        let mut r = Ribbon::new(SURFACE_W, SURFACE_H);
        for i in 0..n {
            let (x, y) = match choice.trim() {
                "2" => (120.0 + 12.0 * i as f64, 300.0 + if i % 2 == 0 { -15.0 } else { 15.0 }),
                "3" => {
                    let t = i as f64 * 0.4;
                    (400.0 + 8.0 * t * t.cos(), 300.0 + 8.0 * t * t.sin())
                }
                _   => (120.0 + 12.0 * i as f64, 300.0),
            };
            r.add_point(x, y);
        }
        r.set_thickness(thickness);
        if (thickness - r.thickness()).abs() > f64::EPSILON {
            println!("  ⚠  thickness clamped to {}–{}", MIN_THICKNESS, MAX_THICKNESS);
        }
        if sine { r.apply_sine_pressures(); }
        r.smooth();
        r.compile();
        for _ in 0..frames { r.advance(); }

        print_strip(&r);
    }
}

fn print_strip(r: &Ribbon) {
    let (jx, jy) = r.wrap_delta();
    println!();
    println!("  ┌─ {} points, {} quads, thickness {}, wrap delta ({:.1}, {:.1})",
        r.point_count(), r.poly_count(), r.thickness(), jx, jy);
    println!("  │");
    for (i, (q, f)) in r.strip().enumerate() {
        let verts: Vec<String> = q.vertices().iter()
            .map(|(x, y)| format!("({:>4},{:>4})", x, y))
            .collect();
        println!("  │  {:>3}  {}  flags={:04b}", i, verts.join(" "), f.bits());
    }
    println!("  └─");
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
