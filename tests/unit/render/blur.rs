use super::*;

#[test]
fn zero_sigma_is_identity() {
    let src = Raster::from_premul(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(blur_raster(&src, 0.0).unwrap(), src);
    assert_eq!(blur_raster(&src, f64::NAN).unwrap(), src);
}

#[test]
fn constant_image_is_unchanged() {
    let src = Raster::filled(4, 3, [10, 20, 30, 40]).unwrap();
    assert_eq!(blur_raster(&src, 2.0).unwrap(), src);
}

#[test]
fn kernel_taps_sum_to_one_and_are_symmetric() {
    for sigma in [0.3, 1.0, 2.5, 8.0] {
        let k = GaussianKernel::new(sigma);
        assert_eq!(k.taps.len(), 2 * k.radius + 1);
        assert_eq!(k.taps.iter().sum::<u32>(), Q16_ONE);
        for i in 0..k.radius {
            assert_eq!(k.taps[i], k.taps[k.taps.len() - 1 - i]);
        }
    }
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut data = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    data[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let src = Raster::from_premul(w, h, data).unwrap();

    let out = blur_raster(&src, 0.6).unwrap();

    let nonzero = out.data.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = out.data.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn vertical_edge_only_blurs_horizontally() {
    let mut data = Vec::new();
    for _ in 0..6 {
        for x in 0..6 {
            let v = if x < 3 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let src = Raster::from_premul(6, 6, data).unwrap();
    let out = blur_raster(&src, 1.0).unwrap();
    for y in 1..6 {
        assert_eq!(out.pixel(2, y), out.pixel(2, 0));
    }
    assert!(out.pixel(2, 0)[0] > 0 && out.pixel(3, 0)[0] < 255);
}
