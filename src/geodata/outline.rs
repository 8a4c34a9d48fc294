use crate::map::{Lod, MapRenderer};

const NORTH_AMERICA: &[(f64, f64)] = &[
    (-166.0, 68.5), (-156.0, 71.3), (-140.0, 69.6), (-125.0, 70.0), (-110.0, 68.0),
    (-95.0, 71.0), (-82.0, 68.0), (-78.0, 62.0), (-65.0, 60.0), (-56.0, 52.0),
    (-60.0, 46.0), (-70.0, 43.0), (-76.0, 38.0), (-76.0, 35.0), (-81.0, 31.0),
    (-80.0, 26.0), (-83.0, 29.0), (-90.0, 29.5), (-97.0, 27.0), (-97.0, 22.0),
    (-92.0, 18.5), (-87.0, 21.0), (-88.0, 16.0), (-83.0, 10.0), (-79.0, 9.0),
    (-86.0, 12.0), (-92.0, 14.5), (-105.0, 20.0), (-110.0, 24.0), (-112.0, 31.0),
    (-117.0, 32.5), (-121.0, 35.0), (-124.0, 41.0), (-124.0, 48.0), (-130.0, 54.5),
    (-140.0, 60.0), (-152.0, 59.0), (-165.0, 54.5), (-160.0, 58.5), (-165.0, 62.0),
    (-166.0, 68.5),
];

const SOUTH_AMERICA: &[(f64, f64)] = &[
    (-77.0, 8.0), (-72.0, 12.0), (-62.0, 10.5), (-52.0, 5.0), (-50.0, 0.0),
    (-44.0, -2.5), (-35.0, -5.5), (-39.0, -13.0), (-41.0, -22.0), (-48.0, -26.0),
    (-53.0, -34.0), (-58.0, -38.5), (-65.0, -41.0), (-67.0, -46.0), (-69.0, -52.0),
    (-74.0, -52.0), (-75.0, -46.0), (-73.5, -37.0), (-71.5, -30.0), (-70.0, -18.0),
    (-76.0, -14.0), (-81.0, -6.0), (-80.0, 0.0), (-78.0, 2.0), (-77.0, 8.0),
];

const AFRICA: &[(f64, f64)] = &[
    (-17.0, 14.7), (-16.5, 19.5), (-13.0, 27.5), (-9.5, 30.5), (-6.0, 35.8),
    (3.0, 36.8), (10.0, 37.2), (11.0, 33.5), (20.0, 30.8), (25.0, 31.6),
    (32.3, 31.2), (34.5, 28.0), (39.0, 21.5), (43.3, 12.6), (51.2, 11.8),
    (49.0, 6.0), (40.0, -3.0), (39.5, -10.0), (40.5, -15.0), (35.0, -22.0),
    (32.5, -28.7), (27.5, -33.7), (20.0, -34.8), (18.3, -33.9), (15.0, -27.0),
    (11.8, -17.0), (13.5, -11.0), (12.0, -5.0), (9.5, 2.0), (9.5, 4.3),
    (4.5, 6.3), (-2.0, 4.8), (-7.5, 4.4), (-13.0, 8.0), (-17.0, 14.7),
];

const EURASIA: &[(f64, f64)] = &[
    (-9.5, 37.0), (-9.0, 43.0), (-1.5, 43.5), (-4.5, 48.5), (2.0, 51.0),
    (8.0, 54.0), (10.5, 57.7), (5.0, 62.0), (14.0, 67.0), (20.0, 70.0),
    (28.0, 71.0), (41.0, 67.0), (55.0, 68.5), (69.0, 73.0), (80.0, 73.5),
    (100.0, 77.0), (113.0, 73.5), (130.0, 71.0), (150.0, 71.5), (160.0, 69.5),
    (170.0, 70.0), (180.0, 66.0), (177.0, 62.5), (163.0, 60.0), (156.0, 51.0),
    (155.5, 57.5), (143.0, 59.3), (135.0, 54.7), (140.5, 48.5), (131.0, 42.5),
    (129.5, 35.0), (126.5, 34.5), (125.0, 37.7), (121.6, 40.8), (119.0, 39.0),
    (122.0, 37.0), (120.5, 36.0), (122.0, 31.0), (121.5, 28.0), (117.5, 24.0),
    (113.0, 22.2), (108.5, 21.6), (106.5, 18.0), (109.0, 11.5), (105.0, 8.7),
    (100.5, 13.5), (99.5, 8.0), (101.0, 2.5), (103.5, 1.3), (98.5, 8.0),
    (98.0, 16.5), (94.5, 16.0), (92.0, 21.5), (88.0, 21.6), (80.3, 15.8),
    (77.5, 8.0), (76.0, 10.5), (73.0, 19.0), (70.0, 22.5), (67.0, 24.8),
    (61.5, 25.2), (57.0, 27.0), (51.5, 27.9), (48.5, 30.0), (50.0, 26.0),
    (56.0, 26.0), (59.8, 22.5), (55.0, 17.0), (45.0, 13.0), (42.7, 15.5),
    (39.0, 21.5), (34.5, 28.0), (32.5, 31.0), (35.0, 33.0), (36.0, 36.5),
    (30.0, 36.2), (26.0, 40.0), (23.0, 38.0), (22.5, 36.5), (21.0, 38.5),
    (19.5, 42.0), (13.6, 45.5), (12.0, 44.0), (15.5, 40.0), (18.5, 40.0),
    (16.0, 38.0), (12.0, 41.5), (8.0, 44.0), (3.2, 43.0), (0.0, 38.8),
    (-5.6, 36.0), (-9.5, 37.0),
];

const AUSTRALIA: &[(f64, f64)] = &[
    (114.0, -22.0), (122.0, -17.0), (129.5, -15.0), (132.0, -11.5), (137.0, -12.0),
    (136.0, -16.0), (141.5, -12.5), (145.5, -15.0), (153.0, -25.0), (153.5, -28.5),
    (150.0, -37.5), (146.0, -39.0), (140.0, -38.0), (138.0, -35.0), (131.0, -31.5),
    (124.0, -33.9), (115.0, -34.3), (113.5, -26.0), (114.0, -22.0),
];

const GREAT_BRITAIN: &[(f64, f64)] = &[
    (-5.7, 50.0), (1.4, 51.2), (1.7, 52.7), (-0.2, 54.0), (-2.0, 55.9),
    (-3.0, 58.6), (-5.0, 58.6), (-6.0, 56.5), (-4.9, 54.8), (-3.0, 53.4),
    (-5.2, 51.7), (-5.7, 50.0),
];

const HONSHU: &[(f64, f64)] = &[
    (130.9, 34.0), (131.4, 34.4), (132.4, 35.4), (133.4, 35.5), (134.5, 35.6),
    (135.7, 35.5), (136.0, 35.9), (136.7, 36.9), (137.3, 36.8), (138.2, 37.2),
    (139.0, 37.9), (139.6, 38.8), (139.9, 39.8), (140.0, 40.7), (140.6, 41.2),
    (141.4, 41.4), (141.5, 40.5), (142.0, 39.5), (141.6, 38.4), (141.0, 37.8),
    (140.9, 36.9), (140.6, 35.7), (139.8, 35.0), (139.2, 35.2), (138.8, 34.6),
    (138.2, 34.6), (137.0, 34.6), (136.8, 34.3), (136.0, 33.5), (135.1, 33.9),
    (135.3, 34.6), (134.3, 34.7), (133.0, 34.4), (131.9, 33.9), (130.9, 34.0),
];

const HOKKAIDO: &[(f64, f64)] = &[
    (140.0, 41.5), (140.5, 42.5), (139.9, 42.9), (141.3, 43.2), (141.6, 45.4),
    (142.4, 44.7), (143.8, 44.1), (145.3, 44.3), (145.3, 43.3), (143.9, 42.9),
    (143.3, 42.0), (141.8, 42.6), (141.0, 41.9), (140.0, 41.5),
];

const KYUSHU: &[(f64, f64)] = &[
    (129.8, 33.2), (130.4, 33.9), (131.0, 33.9), (131.7, 33.1), (131.4, 31.4),
    (130.7, 31.0), (130.2, 31.3), (130.2, 32.1), (129.8, 32.8), (129.8, 33.2),
];

const SHIKOKU: &[(f64, f64)] = &[
    (132.0, 33.0), (132.6, 34.0), (133.5, 34.4), (134.6, 34.2), (134.7, 33.8),
    (134.2, 33.3), (133.0, 32.7), (132.0, 33.0),
];

const OKINAWA: &[(f64, f64)] = &[
    (127.65, 26.08), (127.9, 26.45), (128.3, 26.85), (128.2, 26.6), (127.8, 26.15),
    (127.65, 26.08),
];

/// Coarse coastlines for running without Natural Earth files. Japan is
/// drawn in more detail since it has its own map.
pub(super) fn add_builtin_outline(renderer: &mut MapRenderer) {
    let shapes = [
        NORTH_AMERICA,
        SOUTH_AMERICA,
        AFRICA,
        EURASIA,
        AUSTRALIA,
        GREAT_BRITAIN,
        HONSHU,
        HOKKAIDO,
        KYUSHU,
        SHIKOKU,
        OKINAWA,
    ];
    for shape in shapes {
        renderer.add_coastline(shape.to_vec(), Lod::Low);
    }
}
