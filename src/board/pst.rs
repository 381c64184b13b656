//! Piece-square tables.
//!
//! The tapered PeSTO tables are stored packed: one 96-bit word per square
//! holding twelve signed bytes, middlegame pawn..king followed by endgame
//! pawn..king. Each byte is scaled by [`PACK_SCALE`] and added to the
//! material value of its piece. Squares are in rank-8-first order, so a
//! white piece looks up `square ^ 56` and a black piece its own square.

use once_cell::sync::Lazy;

/// Number of (phase, piece) columns per square.
pub const COLUMNS: usize = 12;

/// Column offset of the endgame half of a row.
pub const ENDGAME: usize = 6;

const PACK_SCALE: f64 = 1.461;

/// Material values, middlegame pawn..king then endgame pawn..king.
pub const PIECE_VALUES: [i32; COLUMNS] = [82, 337, 365, 477, 1025, 0, 94, 281, 297, 512, 936, 0];

#[rustfmt::skip]
const PACKED: [u128; 64] = [
    0xcdfa09f6d800d4ed16ec8e00, 0xe80f07f2e60010001d03c300, 0xf40f0cf8f7000b1416c8e900, 0xf4120afbed00f60823e7de00,
    0xf81208fbeb00da282bef2a00, 0x0a0d08faee00e91e06e3be00, 0x030705f4d500011d1505f600, 0xf40e03f0bc00091f1dfbb700,
    0xf8f408fbef7a14f012eece43, 0x0c0e09fdfb76ffe5160be45c, 0x0a160905ef6cf2fd28f4312a, 0x0c1c08f8ff5cfb012af71941,
    0x0c28fefefa65fbf53715102f, 0x1a1102f7ef5afd272e282a56, 0x101505fdf071e613120c0517, 0x080002f6dc80ec251ee0f4f8,
    0x07f20501f040faf7fdf5e0fc, 0x0c0405fbf24410f40d192905, 0x10060500073a0105121d1912, 0x0a2203ff062ef505191b2c15,
    0x0e2003ffff26f2140c18392c, 0x1f18fe04fa2404261f225826, 0x1e0dfd00f3380f202a193211, 0x0906fe03e439f1270bff1ef2,
    0xfb0203fef416f4eef0fdfaf6, 0x0f0f02060210f2eef8030c09, 0x101009080f09f8f5050d0d04, 0x121f01060f03eef51222240e,
    0x1227010a0fffebff10191910, 0x171b01070803ef0c18192f08, 0x1227ff02050cf6fffb050c0c, 0x02190101f40ce701f2ff0ff0,
    0xf4f402fcf409defae7fcf7ee, 0xfd130302fc06ffeeee0903ff, 0x0e0d05090bfeeefaf8090bfd, 0x1020030d11fbe5f9ff120908,
    0x1215fd050bfbe1ff0617130c, 0x1017fc070cfbe2fdfb080d04, 0x061bfbfe0302e90204070e07, 0xf810f8faf4ffddfef003fbef,
    0xf3f5fdf8f003f6f6e100f0ee, 0xfeee00fefe05f601ef0afafd, 0x080afd05fffcf1f8f50a08fd, 0x0e04ff070a01e1fff40a07f9,
    0x1006fb090700e2fd020a0d02, 0x0b0cf802fefdeb0100120c02, 0x0507fbfbf2fff60afd0c1117, 0xfa03f5f6f1fbee03e907f5f8,
    0xeef1fcf6e30901e8e203ece8, 0xf8f0fcf4f20505fbf50adcff, 0x03eb00fbf905fb08f20bf8f2, 0x09f501fffd07d401fa00fef0,
    0x0af5fa03ff09e305ff05fff6, 0x03f0fafaf200f50a080e0c10, 0xfde7f8f6f00106fefc17f61a, 0xf4eafeeee2fb0501cf01f3f1,
    0xdce9faf0ec00f6fff3e9b800, 0xe9ed01fadd0019f4f7fef200, 0xf2f102f0f00008fa01f6d800, 0xf8e3fffdf600db070cf2e900,
    0xedfdfdfaf10005f60bf7f400, 0xf6eaf7f5f400edef05f8ed00, 0xf0f203fdde0010ebe7e5f300, 0xe3e4f2f4d4000adeeef2f000,
];

/// Unpacked tables indexed by `[square][column]`.
pub static TABLES: Lazy<[[i32; COLUMNS]; 64]> = Lazy::new(unpack);

fn unpack() -> [[i32; COLUMNS]; 64] {
    let mut tables = [[0i32; COLUMNS]; 64];
    for (row, packed) in tables.iter_mut().zip(PACKED.iter()) {
        for (column, cell) in row.iter_mut().enumerate() {
            let raw = (*packed >> (8 * column)) as u8 as i8;
            *cell = (f64::from(raw) * PACK_SCALE) as i32 + PIECE_VALUES[column];
        }
    }
    tables
}
