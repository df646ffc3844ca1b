// bazaar_web/src/views/identicon.rs

//! Blockies-style identicons: an 8×8 horizontally mirrored pattern in three
//! colours, derived from the owner address. Same seed, same picture as the
//! blockies images wallets show for an address.

use alloy_primitives::Address;
use maud::{html, Markup};

const SIZE: usize = 8;
const DATA_WIDTH: usize = SIZE.div_ceil(2);

/// xorshift generator seeded from the address string.
struct Seed([i32; 4]);

impl Seed {
  fn new(seed: &str) -> Self {
    let mut state = [0i32; 4];
    for (i, byte) in seed.bytes().enumerate() {
      let slot = &mut state[i % 4];
      *slot = slot.wrapping_shl(5).wrapping_sub(*slot).wrapping_add(i32::from(byte));
    }
    Self(state)
  }

  /// Uniform value in `[0, 2)`; callers scale it the way blockies does.
  fn next(&mut self) -> f64 {
    let s = &mut self.0;
    let t = s[0] ^ s[0].wrapping_shl(11);
    s[0] = s[1];
    s[1] = s[2];
    s[2] = s[3];
    s[3] = s[3] ^ (s[3] >> 19) ^ t ^ (t >> 8);
    f64::from(s[3] as u32) / 2_147_483_648.0
  }

  fn color(&mut self) -> String {
    let hue = (self.next() * 360.0).floor();
    let saturation = self.next() * 60.0 + 40.0;
    let lightness = (self.next() + self.next() + self.next() + self.next()) * 25.0;
    format!("hsl({hue},{saturation}%,{lightness}%)")
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identicon {
  pub color: String,
  pub background: String,
  pub spot: String,
  /// 0 background, 1 colour, 2 spot.
  pub cells: [[u8; SIZE]; SIZE],
}

impl Identicon {
  pub fn for_address(address: &Address) -> Self {
    // checksummed form, as wallets pass it to blockies
    let mut seed = Seed::new(&address.to_string());
    let color = seed.color();
    let background = seed.color();
    let spot = seed.color();

    let mut cells = [[0u8; SIZE]; SIZE];
    for row in cells.iter_mut() {
      for x in 0..DATA_WIDTH {
        row[x] = (seed.next() * 2.3).floor() as u8;
      }
      for x in 0..SIZE - DATA_WIDTH {
        row[SIZE - 1 - x] = row[x];
      }
    }

    Self {
      color,
      background,
      spot,
      cells,
    }
  }

  pub fn render(&self, pixels: u32) -> Markup {
    html! {
      svg.identicon xmlns="http://www.w3.org/2000/svg" width=(pixels) height=(pixels)
        viewBox="0 0 8 8" shape-rendering="crispEdges" {
        rect width="8" height="8" fill=(self.background) {}
        @for (y, row) in self.cells.iter().enumerate() {
          @for (x, cell) in row.iter().enumerate() {
            @if *cell > 0 {
              rect x=(x) y=(y) width="1" height="1"
                fill=(if *cell == 1 { &self.color } else { &self.spot }) {}
            }
          }
        }
      }
    }
  }
}

pub fn identicon(address: &Address) -> Markup {
  Identicon::for_address(address).render(48)
}
