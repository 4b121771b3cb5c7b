//! Octree over a fixed point snapshot, serving exact nearest-neighbor queries
//! for mirror matching.
//!
//! Nodes live in an arena and address their children by index, so the tree has
//! no ownership cycles and traversal stays cache-friendly. Leaves hold up to
//! [`LEAF_CAPACITY`] points; subdivision stops at [`MAX_DEPTH`] so coincident
//! point clusters terminate.

use crate::float_types::Real;
use nalgebra::Point3;

/// Points a leaf may hold before it subdivides.
pub const LEAF_CAPACITY: usize = 8;

/// Depth bound guaranteeing termination on degenerate clusters.
pub const MAX_DEPTH: u8 = 10;

const NO_NODE: u32 = u32::MAX;

#[derive(Debug, Clone)]
struct Node {
    /// Center of this node's cube.
    center: Point3<Real>,
    /// Half-width of the cube.
    half: Real,
    depth: u8,
    /// Slots into `Octree::entries`; only populated on leaves.
    points: Vec<u32>,
    /// Arena index of the first of 8 children, or `NO_NODE` for a leaf.
    /// Children are allocated contiguously, octant k at `children + k`.
    children: u32,
}

impl Node {
    const fn new(center: Point3<Real>, half: Real, depth: u8) -> Self {
        Self {
            center,
            half,
            depth,
            points: Vec::new(),
            children: NO_NODE,
        }
    }

    const fn is_leaf(&self) -> bool {
        self.children == NO_NODE
    }

    /// Octant 0-7 the point belongs to, one bit per axis.
    fn octant_of(&self, p: &Point3<Real>) -> u32 {
        let mut octant = 0;
        if p.x >= self.center.x {
            octant |= 4;
        }
        if p.y >= self.center.y {
            octant |= 2;
        }
        if p.z >= self.center.z {
            octant |= 1;
        }
        octant
    }

    /// Squared distance from `q` to this node's cube; 0 when inside.
    fn min_dist_sq(&self, q: &Point3<Real>) -> Real {
        let mut d2 = 0.0;
        for axis in 0..3 {
            let excess = (q[axis] - self.center[axis]).abs() - self.half;
            if excess > 0.0 {
                d2 += excess * excess;
            }
        }
        d2
    }
}

/// A spatial index over an immutable snapshot of a point set.
///
/// The octree copies the positions it indexes, so it stays valid if the
/// original mesh is mutated after the build. Rebuild whenever the underlying
/// points change; the tree is never mutated in place after construction.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<Node>,
    /// Indexed positions paired with their stable vertex indices.
    entries: Vec<(u32, Point3<Real>)>,
}

impl Octree {
    /// Build an index over all of `points`, using their positions in the slice
    /// as the stable vertex indices. An empty slice yields an index whose
    /// queries always return `None`.
    pub fn build(points: &[Point3<Real>]) -> Self {
        let all: Vec<u32> = (0..points.len() as u32).collect();
        Self::build_indexed(points, &all)
    }

    /// Build an index over the subset of `points` named by `indices`, keeping
    /// those indices as the stable identifiers reported by queries.
    pub fn build_indexed(points: &[Point3<Real>], indices: &[u32]) -> Self {
        if indices.is_empty() {
            return Self {
                nodes: Vec::new(),
                entries: Vec::new(),
            };
        }

        let mut mins = points[indices[0] as usize];
        let mut maxs = mins;
        for &i in indices {
            let p = points[i as usize];
            for axis in 0..3 {
                if p[axis] < mins[axis] {
                    mins[axis] = p[axis];
                }
                if p[axis] > maxs[axis] {
                    maxs[axis] = p[axis];
                }
            }
        }
        let center = nalgebra::center(&mins, &maxs);
        let extent = (maxs.x - mins.x).max(maxs.y - mins.y).max(maxs.z - mins.z);
        // Small buffer so boundary points land inside the root cube; a cube of
        // half-width 1 stands in for a zero-extent cloud.
        let half = if extent > 0.0 { extent * 0.5 * 1.01 } else { 1.0 };

        let mut tree = Self {
            nodes: vec![Node::new(center, half, 0)],
            entries: Vec::with_capacity(indices.len()),
        };
        for &i in indices {
            let slot = tree.entries.len() as u32;
            tree.entries.push((i, points[i as usize]));
            tree.insert(0, slot);
        }
        tree
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, node: usize, slot: u32) {
        if self.nodes[node].is_leaf() {
            self.nodes[node].points.push(slot);
            if self.nodes[node].points.len() > LEAF_CAPACITY
                && self.nodes[node].depth < MAX_DEPTH
            {
                self.subdivide(node);
            }
            return;
        }
        let p = self.entries[slot as usize].1;
        let octant = self.nodes[node].octant_of(&p);
        let child = (self.nodes[node].children + octant) as usize;
        self.insert(child, slot);
    }

    /// Split a full leaf into 8 octants and reinsert its points.
    fn subdivide(&mut self, node: usize) {
        let first_child = self.nodes.len() as u32;
        let center = self.nodes[node].center;
        let half = self.nodes[node].half * 0.5;
        let depth = self.nodes[node].depth + 1;

        for octant in 0..8u32 {
            let child_center = Point3::new(
                center.x + if octant & 4 != 0 { half } else { -half },
                center.y + if octant & 2 != 0 { half } else { -half },
                center.z + if octant & 1 != 0 { half } else { -half },
            );
            self.nodes.push(Node::new(child_center, half, depth));
        }

        let points = std::mem::take(&mut self.nodes[node].points);
        self.nodes[node].children = first_child;
        for slot in points {
            let p = self.entries[slot as usize].1;
            let octant = self.nodes[node].octant_of(&p);
            self.insert((first_child + octant) as usize, slot);
        }
    }

    /// The true nearest indexed point to `query` and its Euclidean distance.
    /// Ties are broken by traversal order, deterministically.
    pub fn nearest(&self, query: &Point3<Real>) -> Option<(u32, Real)> {
        self.nearest_within(query, Real::INFINITY)
    }

    /// Like [`nearest`](Self::nearest), but rejects points farther than
    /// `max_dist` (inclusive) and uses the cap to prune the descent.
    pub fn nearest_within(&self, query: &Point3<Real>, max_dist: Real) -> Option<(u32, Real)> {
        if self.nodes.is_empty() {
            return None;
        }
        let cap_sq = if max_dist.is_finite() {
            max_dist * max_dist
        } else {
            Real::INFINITY
        };
        let mut best: Option<(u32, Real)> = None;
        self.search(0, query, cap_sq, &mut best);
        best.map(|(idx, d2)| (idx, d2.sqrt()))
    }

    /// Recursive descent: exhaustive scan at leaves, containing octant first
    /// at interior nodes, siblings pruned by distance-to-cube.
    fn search(&self, node: usize, query: &Point3<Real>, cap_sq: Real, best: &mut Option<(u32, Real)>) {
        let n = &self.nodes[node];
        let bound = |best: &Option<(u32, Real)>| match best {
            Some((_, d2)) => d2.min(cap_sq),
            None => cap_sq,
        };

        if n.is_leaf() {
            for &slot in &n.points {
                let (idx, p) = self.entries[slot as usize];
                let d2 = nalgebra::distance_squared(query, &p);
                let better = match best {
                    Some((_, b)) => d2 < *b,
                    None => true,
                };
                if d2 <= cap_sq && better {
                    *best = Some((idx, d2));
                }
            }
            return;
        }

        let home = n.octant_of(query);
        let home_child = (n.children + home) as usize;
        self.search(home_child, query, cap_sq, best);

        for octant in 0..8u32 {
            if octant == home {
                continue;
            }
            let child = (n.children + octant) as usize;
            if self.nodes[child].min_dist_sq(query) <= bound(best) {
                self.search(child, query, cap_sq, best);
            }
        }
    }
}
