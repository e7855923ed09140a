use num::Float;

/// 密ベクトルのドット積を計算するメソッド
///
/// # Arguments
/// * `a` - ベクトル
/// * `b` - 他のベクトル (同じ長さ)
///
/// # Returns
/// * `N` - ドット積の結果
#[inline]
pub fn dot<N>(a: &[N], b: &[N]) -> N
where
    N: Float,
{
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Vectors must be of the same length to compute dot product."
    );
    a.iter()
        .zip(b.iter())
        .fold(N::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Logistic sigmoid `1 / (1 + e^-z)`
/// 指数部が正にならないよう符号で分岐するので、|z| が大きくてもオーバーフローしない
/// NaN は NaN のまま返す
#[inline]
pub fn sigmoid<N>(z: N) -> N
where
    N: Float,
{
    if z >= N::zero() {
        N::one() / (N::one() + (-z).exp())
    } else {
        let e = z.exp();
        e / (N::one() + e)
    }
}
